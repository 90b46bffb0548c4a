use lords_core::AiModel;
use serde::{Deserialize, Serialize};

use crate::api::Pagination;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::ranking::{SortDirection, SortKey};

/// Query for the plain model listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilters {
    pub category: Option<String>,
    /// 1-based
    pub page: u32,
    pub limit: u32,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            category: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListFilters {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(category) = &self.category {
            query.push(("category", category.clone()));
        }
        query
    }
}

/// Query for the filtered search endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub category: Option<String>,
    pub developer: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortDirection>,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            developer: None,
            min_score: None,
            max_score: None,
            sort_by: None,
            sort_order: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchFilters {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(q) = self.query.as_deref().filter(|q| !q.trim().is_empty()) {
            query.push(("query", q.trim().to_string()));
        }
        if let Some(category) = &self.category {
            query.push(("category", category.clone()));
        }
        if let Some(developer) = &self.developer {
            query.push(("developer", developer.clone()));
        }
        if let Some(min) = self.min_score {
            query.push(("min_score", min.to_string()));
        }
        if let Some(max) = self.max_score {
            query.push(("max_score", max.to_string()));
        }
        if let Some(key) = self.sort_by {
            query.push(("sort_by", key.to_string()));
        }
        if let Some(direction) = self.sort_order {
            query.push(("sort_order", direction.to_string()));
        }
        query.push(("page", self.page.to_string()));
        query.push(("limit", self.limit.to_string()));
        query
    }

    /// Whether `model` satisfies every filter except paging and sorting
    pub fn matches(&self, model: &AiModel) -> bool {
        if let Some(q) = &self.query {
            if !text_matches(model, q) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !model
                .category_name()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
            {
                return false;
            }
        }
        if let Some(developer) = &self.developer {
            if !model
                .developer
                .to_lowercase()
                .contains(&developer.to_lowercase())
            {
                return false;
            }
        }
        let score = model.score.unwrap_or(0.0);
        if self.min_score.is_some_and(|min| score < min) {
            return false;
        }
        if self.max_score.is_some_and(|max| score > max) {
            return false;
        }
        true
    }
}

/// Admin create/update payload; unset fields are left out of the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

/// Admin payload for a new characteristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMetric {
    pub characteristic_name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
}

/// One page of models in canonical form
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPage {
    pub models: Vec<AiModel>,
    pub page: u32,
    pub limit: u32,
    pub pagination: Option<Pagination>,
}

impl ModelPage {
    /// A short (or empty) page means there is nothing after it
    pub fn is_last(&self) -> bool {
        if (self.models.len() as u64) < u64::from(self.limit) {
            return true;
        }
        match self.pagination.as_ref().and_then(|p| p.total_pages) {
            Some(total_pages) => self.page >= total_pages,
            None => false,
        }
    }
}

fn text_matches(model: &AiModel, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || model.name.to_lowercase().contains(&needle)
        || model.description.to_lowercase().contains(&needle)
}

/// Keep models whose name or description contains `query`, ignoring case
pub fn filter_by_text(models: &[AiModel], query: &str) -> Vec<AiModel> {
    models
        .iter()
        .filter(|m| text_matches(m, query))
        .cloned()
        .collect()
}
