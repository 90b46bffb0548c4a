use async_trait::async_trait;
use lords_core::{AiModel, Category, ModelId, ModelMetric, VoteValue};

use super::{ListFilters, ModelDraft, ModelPage, NewMetric, SearchFilters};
use crate::api::ApiResult;

#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// Get one page of models
    async fn list(&self, filters: &ListFilters) -> ApiResult<ModelPage>;

    /// Get a model by ID
    async fn get_by_id(&self, id: ModelId) -> ApiResult<AiModel>;

    /// Create a new model
    async fn create(&self, draft: &ModelDraft) -> ApiResult<AiModel>;

    /// Update an existing model
    async fn update(&self, id: ModelId, draft: &ModelDraft) -> ApiResult<AiModel>;

    /// Delete a model
    async fn delete(&self, id: ModelId) -> ApiResult<()>;

    /// Record one vote
    async fn vote(&self, id: ModelId, value: VoteValue) -> ApiResult<()>;

    /// Get the characteristics of a model
    async fn list_metrics(&self, id: ModelId) -> ApiResult<Vec<ModelMetric>>;

    /// Add a characteristic to a model
    async fn add_metric(&self, id: ModelId, metric: &NewMetric) -> ApiResult<ModelMetric>;

    /// Remove a characteristic from a model
    async fn delete_metric(&self, id: ModelId, metric_id: i64) -> ApiResult<()>;

    /// Filtered, sorted and paged search
    async fn search(&self, filters: &SearchFilters) -> ApiResult<ModelPage>;

    /// Get all categories
    async fn list_categories(&self) -> ApiResult<Vec<Category>>;
}
