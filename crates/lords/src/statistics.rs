//! Aggregate figures over an already-fetched catalog

use lords_core::AiModel;
use serde::Serialize;

use crate::ranking::{RankedModel, SortDirection, SortKey, top_n};

/// Bucket name for models without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub count: usize,
    /// 0–100
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub models: usize,
    pub categories: usize,
    pub total_votes: i64,
    pub likes: i64,
    pub dislikes: i64,
    /// Mean over models that have a score
    pub mean_score: Option<f64>,
}

/// Model count per category, in order of first appearance
pub fn category_distribution(models: &[AiModel]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();
    for model in models {
        let name = model.category_name().unwrap_or(UNCATEGORIZED);
        match shares.iter_mut().find(|s| s.name == name) {
            Some(share) => share.count += 1,
            None => shares.push(CategoryShare {
                name: name.to_string(),
                count: 1,
                percent: 0.0,
            }),
        }
    }

    let total = models.len() as f64;
    for share in &mut shares {
        share.percent = share.count as f64 * 100.0 / total;
    }
    shares
}

/// Most-engaged models (likes minus dislikes), highest first
pub fn top_by_engagement(models: &[AiModel], n: usize) -> Vec<RankedModel> {
    top_n(models, SortKey::Engagement, SortDirection::Desc, n)
}

/// `(name, vote_score)` per model, in input order
pub fn vote_chart(models: &[AiModel]) -> Vec<(String, i64)> {
    models
        .iter()
        .map(|m| (m.name.clone(), m.vote_score))
        .collect()
}

pub fn summary(models: &[AiModel]) -> CatalogSummary {
    let scores: Vec<f64> = models.iter().filter_map(|m| m.score).collect();
    let mean_score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    CatalogSummary {
        models: models.len(),
        categories: category_distribution(models).len(),
        total_votes: models.iter().map(|m| m.total_votes).sum(),
        likes: models.iter().map(|m| m.likes).sum(),
        dislikes: models.iter().map(|m| m.dislikes).sum(),
        mean_score,
    }
}
