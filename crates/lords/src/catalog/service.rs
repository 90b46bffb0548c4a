use lords_core::{AiModel, Category, ModelId, ModelMetric, VoteValue};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::{ListFilters, ModelDraft, ModelPage, ModelRepository, NewMetric, SearchFilters};
use crate::api::ApiResult;
use crate::compare::{ComparedModel, Comparison, MetricFetch, build_comparison};
use crate::config::DEFAULT_PAGE_SIZE;
use crate::vote::PendingVote;

/// Upper bound on pages `list_all` will walk
const MAX_PAGES: u32 = 500;

/// Service layer for catalog operations
#[derive(Clone)]
pub struct ModelService {
    repository: Arc<dyn ModelRepository>,
    page_size: u32,
}

impl ModelService {
    pub fn new(repository: Arc<dyn ModelRepository>) -> Self {
        Self {
            repository,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn repository(&self) -> &Arc<dyn ModelRepository> {
        &self.repository
    }

    /// One page of the catalog
    pub async fn list_models(&self, filters: &ListFilters) -> ApiResult<ModelPage> {
        self.repository.list(filters).await
    }

    /// Walk every page until a short page or the declared last page
    pub async fn list_all(&self, category: Option<&str>) -> ApiResult<Vec<AiModel>> {
        let mut filters = ListFilters::page(1, self.page_size);
        filters.category = category.map(str::to_string);

        let mut models = Vec::new();
        loop {
            let page = self.repository.list(&filters).await?;
            let last = page.is_last();
            debug!(page = filters.page, count = page.models.len(), last, "Fetched catalog page");
            models.extend(page.models);
            if last {
                break;
            }
            if filters.page >= MAX_PAGES {
                warn!(pages = MAX_PAGES, "Stopped paging at the page limit");
                break;
            }
            filters.page += 1;
        }
        Ok(models)
    }

    /// A model with its characteristics, fetched concurrently
    pub async fn get_model_details(&self, id: ModelId) -> ApiResult<AiModel> {
        let (mut model, metrics) = tokio::try_join!(
            self.repository.get_by_id(id),
            self.repository.list_metrics(id)
        )?;
        if !metrics.is_empty() {
            model.characteristics = metrics;
        }
        Ok(model)
    }

    pub async fn search(&self, filters: &SearchFilters) -> ApiResult<ModelPage> {
        self.repository.search(filters).await
    }

    pub async fn create_model(&self, draft: &ModelDraft) -> ApiResult<AiModel> {
        let model = self.repository.create(draft).await?;
        info!(model_id = %model.model_id, name = %model.name, "Model created");
        Ok(model)
    }

    pub async fn update_model(&self, id: ModelId, draft: &ModelDraft) -> ApiResult<AiModel> {
        let model = self.repository.update(id, draft).await?;
        info!(model_id = %id, "Model updated");
        Ok(model)
    }

    pub async fn delete_model(&self, id: ModelId) -> ApiResult<()> {
        self.repository.delete(id).await?;
        info!(model_id = %id, "Model deleted");
        Ok(())
    }

    pub async fn list_metrics(&self, id: ModelId) -> ApiResult<Vec<ModelMetric>> {
        self.repository.list_metrics(id).await
    }

    pub async fn add_metric(&self, id: ModelId, metric: &NewMetric) -> ApiResult<ModelMetric> {
        self.repository.add_metric(id, metric).await
    }

    pub async fn delete_metric(&self, id: ModelId, metric_id: i64) -> ApiResult<()> {
        self.repository.delete_metric(id, metric_id).await
    }

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    /// Count the vote on `model` right away and confirm it with the server.
    ///
    /// If the server rejects it the counters on `model` are restored to
    /// exactly what they were and the error is returned.
    pub async fn vote(&self, model: &mut AiModel, value: VoteValue) -> ApiResult<()> {
        let pending = PendingVote::begin(model, value);
        match self.repository.vote(pending.model_id(), value).await {
            Ok(()) => {
                info!(model_id = %pending.model_id(), vote = %value, "Vote recorded");
                pending.commit();
                Ok(())
            }
            Err(e) => {
                warn!(model_id = %pending.model_id(), vote = %value, error = %e, "Vote rejected, rolling back");
                pending.rollback(model);
                Err(e)
            }
        }
    }

    /// Fetch every model's characteristics concurrently and build the radar
    /// series. One failed fetch does not sink the others.
    pub async fn compare(&self, models: &[AiModel]) -> Comparison {
        let mut tasks = JoinSet::new();
        for (index, model) in models.iter().enumerate() {
            let repository = Arc::clone(&self.repository);
            let id = model.model_id;
            tasks.spawn(async move { (index, repository.list_metrics(id).await) });
        }

        let mut fetches: Vec<MetricFetch> = models
            .iter()
            .map(|_| MetricFetch::Failed("metric fetch did not complete".to_string()))
            .collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(metrics))) => fetches[index] = MetricFetch::Loaded(metrics),
                Ok((index, Err(e))) => {
                    warn!(model_id = %models[index].model_id, error = %e, "Metric fetch failed");
                    fetches[index] = MetricFetch::Failed(e.to_string());
                }
                Err(e) => warn!(error = %e, "Metric fetch task aborted"),
            }
        }

        let compared: Vec<ComparedModel> = models
            .iter()
            .zip(fetches)
            .map(|(model, fetch)| ComparedModel::new(model, fetch))
            .collect();
        build_comparison(&compared)
    }
}
