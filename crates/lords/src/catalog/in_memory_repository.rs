use async_trait::async_trait;
use lords_core::{AiModel, Category, ModelId, ModelMetric, VoteValue};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{ListFilters, ModelDraft, ModelPage, ModelRepository, NewMetric, SearchFilters};
use crate::api::{ApiError, ApiResult, Pagination};
use crate::ranking::rank;
use crate::vote::VoteEvent;

/// In-memory catalog for offline use and tests.
///
/// Behaves like the backend: unknown ids are `NotFound`, an empty model name
/// is rejected with a 400, and metrics live on the model they belong to.
pub struct InMemoryModelRepository {
    models: RwLock<BTreeMap<ModelId, AiModel>>,
    categories: RwLock<Vec<Category>>,
    next_model_id: AtomicI64,
    next_metric_id: AtomicI64,
}

impl InMemoryModelRepository {
    pub fn new() -> Self {
        Self {
            models: RwLock::new(BTreeMap::new()),
            categories: RwLock::new(Vec::new()),
            next_model_id: AtomicI64::new(1),
            next_metric_id: AtomicI64::new(1),
        }
    }

    /// Seed with existing models; new ids continue after the largest one
    pub fn with_models(models: impl IntoIterator<Item = AiModel>) -> Self {
        let repo = Self::new();
        let mut max_model = 0;
        let mut max_metric = 0;
        let mut map = BTreeMap::new();
        let mut categories: Vec<Category> = Vec::new();
        for model in models {
            max_model = max_model.max(model.model_id.as_i64());
            for metric in &model.characteristics {
                max_metric = max_metric.max(metric.characteristic_id);
            }
            if let Some(category) = &model.category {
                if !categories.contains(category) {
                    categories.push(category.clone());
                }
            }
            map.insert(model.model_id, model);
        }
        repo.next_model_id.store(max_model + 1, Ordering::SeqCst);
        repo.next_metric_id.store(max_metric + 1, Ordering::SeqCst);
        Self {
            models: RwLock::new(map),
            categories: RwLock::new(categories),
            ..repo
        }
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, BTreeMap<ModelId, AiModel>>> {
        self.models
            .read()
            .map_err(|e| lock_error(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, BTreeMap<ModelId, AiModel>>> {
        self.models
            .write()
            .map_err(|e| lock_error(format!("Failed to acquire write lock: {}", e)))
    }

    fn resolve_category(&self, category_id: Option<i64>) -> ApiResult<Option<Category>> {
        let Some(id) = category_id else {
            return Ok(None);
        };
        let categories = self
            .categories
            .read()
            .map_err(|e| lock_error(format!("Failed to acquire read lock: {}", e)))?;
        Ok(Some(
            categories
                .iter()
                .find(|c| c.category_id == Some(id))
                .cloned()
                .unwrap_or_else(|| Category::new(Some(id), format!("Category {}", id))),
        ))
    }
}

impl Default for InMemoryModelRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(message: String) -> ApiError {
    ApiError::Server {
        status: 500,
        message,
    }
}

fn not_found(id: ModelId) -> ApiError {
    ApiError::NotFound(format!("Model {} not found", id))
}

fn paginate(models: Vec<AiModel>, page: u32, limit: u32) -> ModelPage {
    let limit = limit.max(1);
    let page = page.max(1);
    let total = models.len() as u64;
    let total_pages = total.div_ceil(u64::from(limit)) as u32;
    let skip = (page as usize - 1) * limit as usize;
    let models: Vec<AiModel> = models.into_iter().skip(skip).take(limit as usize).collect();
    ModelPage {
        models,
        page,
        limit,
        pagination: Some(Pagination {
            total: Some(total),
            page: Some(page),
            limit: Some(limit),
            total_pages: Some(total_pages),
        }),
    }
}

#[async_trait]
impl ModelRepository for InMemoryModelRepository {
    async fn list(&self, filters: &ListFilters) -> ApiResult<ModelPage> {
        let models = self.read()?;
        let matching: Vec<AiModel> = models
            .values()
            .filter(|m| match &filters.category {
                Some(category) => m
                    .category_name()
                    .is_some_and(|c| c.eq_ignore_ascii_case(category)),
                None => true,
            })
            .cloned()
            .collect();
        Ok(paginate(matching, filters.page, filters.limit))
    }

    async fn get_by_id(&self, id: ModelId) -> ApiResult<AiModel> {
        let models = self.read()?;
        models.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn create(&self, draft: &ModelDraft) -> ApiResult<AiModel> {
        let name = draft.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(ApiError::Client {
                status: 400,
                message: "Model name is required".to_string(),
            });
        }

        let id = ModelId::new(self.next_model_id.fetch_add(1, Ordering::SeqCst));
        let mut model = AiModel::new(id, name);
        model.developer = draft.developer.clone().unwrap_or_default();
        model.description = draft.description.clone().unwrap_or_default();
        model.release_date = draft.release_date.clone();
        model.category = self.resolve_category(draft.category_id)?;

        self.write()?.insert(id, model.clone());
        Ok(model)
    }

    async fn update(&self, id: ModelId, draft: &ModelDraft) -> ApiResult<AiModel> {
        if draft.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ApiError::Client {
                status: 400,
                message: "Model name cannot be empty".to_string(),
            });
        }
        let category = self.resolve_category(draft.category_id)?;

        let mut models = self.write()?;
        let model = models.get_mut(&id).ok_or_else(|| not_found(id))?;
        if let Some(name) = &draft.name {
            model.name = name.trim().to_string();
        }
        if let Some(developer) = &draft.developer {
            model.developer = developer.clone();
        }
        if let Some(description) = &draft.description {
            model.description = description.clone();
        }
        if let Some(release_date) = &draft.release_date {
            model.release_date = Some(release_date.clone());
        }
        if category.is_some() {
            model.category = category;
        }
        Ok(model.clone())
    }

    async fn delete(&self, id: ModelId) -> ApiResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn vote(&self, id: ModelId, value: VoteValue) -> ApiResult<()> {
        let mut models = self.write()?;
        let model = models.get_mut(&id).ok_or_else(|| not_found(id))?;
        VoteEvent::Cast(value).apply_to(model);
        Ok(())
    }

    async fn list_metrics(&self, id: ModelId) -> ApiResult<Vec<ModelMetric>> {
        let models = self.read()?;
        models
            .get(&id)
            .map(|m| m.characteristics.clone())
            .ok_or_else(|| not_found(id))
    }

    async fn add_metric(&self, id: ModelId, metric: &NewMetric) -> ApiResult<ModelMetric> {
        if metric.characteristic_name.trim().is_empty() {
            return Err(ApiError::Client {
                status: 400,
                message: "Characteristic name is required".to_string(),
            });
        }

        let mut models = self.write()?;
        let model = models.get_mut(&id).ok_or_else(|| not_found(id))?;
        let created = ModelMetric {
            characteristic_id: self.next_metric_id.fetch_add(1, Ordering::SeqCst),
            model_id: id,
            characteristic_name: metric.characteristic_name.clone(),
            value: metric.value,
            confidence_level: metric.confidence_level,
            created_at: None,
        };
        model.characteristics.push(created.clone());
        Ok(created)
    }

    async fn delete_metric(&self, id: ModelId, metric_id: i64) -> ApiResult<()> {
        let mut models = self.write()?;
        let model = models.get_mut(&id).ok_or_else(|| not_found(id))?;
        let before = model.characteristics.len();
        model
            .characteristics
            .retain(|m| m.characteristic_id != metric_id);
        if model.characteristics.len() == before {
            return Err(ApiError::NotFound(format!(
                "Characteristic {} not found on model {}",
                metric_id, id
            )));
        }
        Ok(())
    }

    async fn search(&self, filters: &SearchFilters) -> ApiResult<ModelPage> {
        let matching: Vec<AiModel> = {
            let models = self.read()?;
            models
                .values()
                .filter(|m| filters.matches(m))
                .cloned()
                .collect()
        };

        let ordered = match filters.sort_by {
            Some(key) => {
                let direction = filters.sort_order.unwrap_or(key.default_direction());
                rank(&matching, key, direction)
                    .into_iter()
                    .map(|r| r.model)
                    .collect()
            }
            None => matching,
        };
        Ok(paginate(ordered, filters.page, filters.limit))
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.categories
            .read()
            .map(|c| c.clone())
            .map_err(|e| lock_error(format!("Failed to acquire read lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{SortDirection, SortKey};

    fn seeded() -> InMemoryModelRepository {
        let mut gpt = AiModel::new(1, "GPT-4");
        gpt.developer = "OpenAI".to_string();
        gpt.category = Some(Category::new(Some(1), "texto"));
        gpt.score = Some(9.1);

        let mut sd = AiModel::new(2, "Stable Diffusion");
        sd.developer = "Stability AI".to_string();
        sd.category = Some(Category::new(Some(2), "imagen"));
        sd.score = Some(8.2);

        let mut llama = AiModel::new(3, "Llama 3");
        llama.developer = "Meta".to_string();
        llama.category = Some(Category::new(Some(1), "texto"));
        llama.score = Some(8.7);

        InMemoryModelRepository::with_models([gpt, sd, llama])
    }

    #[tokio::test]
    async fn test_list_pages_and_filters() {
        let repo = seeded();

        let page = repo.list(&ListFilters::page(1, 2)).await.unwrap();
        assert_eq!(page.models.len(), 2);
        assert!(!page.is_last());
        assert_eq!(page.pagination.as_ref().unwrap().total_pages, Some(2));

        let second = repo.list(&ListFilters::page(2, 2)).await.unwrap();
        assert_eq!(second.models.len(), 1);
        assert!(second.is_last());

        let texto = repo
            .list(&ListFilters::default().with_category("texto"))
            .await
            .unwrap();
        assert_eq!(texto.models.len(), 2);
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let repo = seeded();
        let created = repo
            .create(&ModelDraft {
                name: Some("Claude".to_string()),
                category_id: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.model_id, ModelId::new(4));
        assert_eq!(created.category_name(), Some("texto"));

        let empty = repo.create(&ModelDraft::default()).await;
        assert_eq!(empty.unwrap_err().status(), Some(400));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = seeded();
        let updated = repo
            .update(
                ModelId::new(2),
                &ModelDraft {
                    description: Some("Difusión latente".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Stable Diffusion");
        assert_eq!(updated.description, "Difusión latente");

        repo.delete(ModelId::new(2)).await.unwrap();
        let gone = repo.get_by_id(ModelId::new(2)).await;
        assert!(matches!(gone, Err(ApiError::NotFound(_))));
        assert!(repo.delete(ModelId::new(2)).await.is_err());
    }

    #[tokio::test]
    async fn test_vote_updates_counters() {
        let repo = seeded();
        repo.vote(ModelId::new(1), VoteValue::Up).await.unwrap();
        repo.vote(ModelId::new(1), VoteValue::Down).await.unwrap();
        repo.vote(ModelId::new(1), VoteValue::Up).await.unwrap();

        let model = repo.get_by_id(ModelId::new(1)).await.unwrap();
        assert_eq!(model.likes, 2);
        assert_eq!(model.dislikes, 1);
        assert_eq!(model.vote_score, 1);
        assert_eq!(model.total_votes, 3);
    }

    #[tokio::test]
    async fn test_metrics_lifecycle() {
        let repo = seeded();
        let id = ModelId::new(3);
        let added = repo
            .add_metric(
                id,
                &NewMetric {
                    characteristic_name: "precision".to_string(),
                    value: 88.0,
                    confidence_level: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(added.model_id, id);
        assert_eq!(repo.list_metrics(id).await.unwrap().len(), 1);

        repo.delete_metric(id, added.characteristic_id).await.unwrap();
        assert!(repo.list_metrics(id).await.unwrap().is_empty());
        assert!(repo.delete_metric(id, added.characteristic_id).await.is_err());
    }

    #[tokio::test]
    async fn test_search_sorts_with_ranking_engine() {
        let repo = seeded();
        let page = repo
            .search(&SearchFilters {
                category: Some("texto".to_string()),
                sort_by: Some(SortKey::Score),
                sort_order: Some(SortDirection::Asc),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = page.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Llama 3", "GPT-4"]);

        let by_dev = repo
            .search(&SearchFilters {
                developer: Some("stability".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_dev.models.len(), 1);
    }

    #[tokio::test]
    async fn test_categories_collected_from_seed() {
        let repo = seeded();
        let categories = repo.list_categories().await.unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["texto", "imagen"]);
    }
}
