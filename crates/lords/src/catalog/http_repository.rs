use async_trait::async_trait;
use lords_core::{AiModel, Category, ModelId, ModelMetric, VoteValue};
use serde_json::json;

use super::{ListFilters, ModelDraft, ModelPage, ModelRepository, NewMetric, SearchFilters};
use crate::api::wire::{WireCategoryRow, WireMetric, WireModel, decode_item, decode_list};
use crate::api::{ApiResult, Transport};

/// Catalog backend over REST
#[derive(Clone)]
pub struct HttpModelRepository {
    transport: Transport,
}

impl HttpModelRepository {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn page(body: &[u8], page: u32, limit: u32) -> ApiResult<ModelPage> {
        let (wire, pagination) = decode_list::<WireModel>(body)?;
        let models = wire
            .into_iter()
            .map(WireModel::into_model)
            .collect::<ApiResult<Vec<_>>>()?;
        Ok(ModelPage {
            models,
            page,
            limit,
            pagination,
        })
    }

    fn model(body: &[u8]) -> ApiResult<AiModel> {
        decode_item::<WireModel>(body)?.into_model()
    }
}

#[async_trait]
impl ModelRepository for HttpModelRepository {
    async fn list(&self, filters: &ListFilters) -> ApiResult<ModelPage> {
        let body = self.transport.get("models", &filters.query()).await?;
        Self::page(&body, filters.page, filters.limit)
    }

    async fn get_by_id(&self, id: ModelId) -> ApiResult<AiModel> {
        let body = self.transport.get(&format!("models/{}", id), &[]).await?;
        Self::model(&body)
    }

    async fn create(&self, draft: &ModelDraft) -> ApiResult<AiModel> {
        let body = self.transport.post("models", draft).await?;
        Self::model(&body)
    }

    async fn update(&self, id: ModelId, draft: &ModelDraft) -> ApiResult<AiModel> {
        let body = self.transport.put(&format!("models/{}", id), draft).await?;
        Self::model(&body)
    }

    async fn delete(&self, id: ModelId) -> ApiResult<()> {
        self.transport.delete(&format!("models/{}", id)).await?;
        Ok(())
    }

    async fn vote(&self, id: ModelId, value: VoteValue) -> ApiResult<()> {
        self.transport
            .post(&format!("models/{}/vote", id), &json!({ "value": value }))
            .await?;
        Ok(())
    }

    async fn list_metrics(&self, id: ModelId) -> ApiResult<Vec<ModelMetric>> {
        let body = self
            .transport
            .get(&format!("models/{}/metrics", id), &[])
            .await?;
        let (wire, _) = decode_list::<WireMetric>(&body)?;
        wire.into_iter().map(|m| m.into_metric(id)).collect()
    }

    async fn add_metric(&self, id: ModelId, metric: &NewMetric) -> ApiResult<ModelMetric> {
        let body = self
            .transport
            .post(&format!("models/{}/metrics", id), metric)
            .await?;
        decode_item::<WireMetric>(&body)?.into_metric(id)
    }

    async fn delete_metric(&self, id: ModelId, metric_id: i64) -> ApiResult<()> {
        self.transport
            .delete(&format!("models/{}/metrics/{}", id, metric_id))
            .await?;
        Ok(())
    }

    async fn search(&self, filters: &SearchFilters) -> ApiResult<ModelPage> {
        let body = self.transport.get("models/search", &filters.query()).await?;
        Self::page(&body, filters.page, filters.limit)
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let body = self.transport.get("categories", &[]).await?;
        let (wire, _) = decode_list::<WireCategoryRow>(&body)?;
        Ok(wire.into_iter().map(WireCategoryRow::into_category).collect())
    }
}
