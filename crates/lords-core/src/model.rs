use serde::{Deserialize, Serialize};

use crate::ModelId;

/// Characteristic names offered by the admin metric form
pub const METRIC_CANDIDATES: [&str; 12] = [
    "precision",
    "exactitud",
    "sensibilidad",
    "puntuacion_f1",
    "perdida",
    "tiempo_inferencia",
    "uso_memoria",
    "tasa_aprendizaje",
    "generalizacion",
    "robustez",
    "eficiencia_computacional",
    "convergencia",
];

/// A catalog entry being rated and compared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiModel {
    pub model_id: ModelId,
    pub name: String,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    /// Server-computed aggregate, never recomputed client-side
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub vote_score: i64,
    #[serde(default)]
    pub total_votes: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub dislikes: i64,
    #[serde(default)]
    pub characteristics: Vec<ModelMetric>,
    #[serde(default)]
    pub benchmark_results: Vec<BenchmarkResult>,
    #[serde(default)]
    pub versions: Vec<ModelVersion>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl AiModel {
    /// Minimal model with empty collections and zeroed counters
    pub fn new(model_id: impl Into<ModelId>, name: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            name: name.into(),
            developer: String::new(),
            description: String::new(),
            release_date: None,
            category: None,
            score: None,
            vote_score: 0,
            total_votes: 0,
            likes: 0,
            dislikes: 0,
            characteristics: Vec::new(),
            benchmark_results: Vec::new(),
            versions: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.category_name.as_str())
    }

    /// Likes minus dislikes
    pub fn engagement(&self) -> i64 {
        self.likes - self.dislikes
    }

    /// Look up a characteristic by exact name
    pub fn metric(&self, name: &str) -> Option<&ModelMetric> {
        self.characteristics
            .iter()
            .find(|m| m.characteristic_name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: Option<i64>,
    pub category_name: String,
}

impl Category {
    pub fn new(category_id: Option<i64>, category_name: impl Into<String>) -> Self {
        Self {
            category_id,
            category_name: category_name.into(),
        }
    }
}

/// A named numeric attribute of a model (0-100 expected)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetric {
    pub characteristic_id: i64,
    pub model_id: ModelId,
    pub characteristic_name: String,
    pub value: f64,
    #[serde(default)]
    pub confidence_level: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub benchmark_id: i64,
    #[serde(default)]
    pub benchmark_name: String,
    pub score: f64,
    #[serde(default)]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub memory_usage: Option<f64>,
    pub test_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersion {
    pub version_id: i64,
    pub version_number: String,
    pub release_date: String,
    #[serde(default)]
    pub changes_description: Option<String>,
    #[serde(default)]
    pub is_major_update: bool,
    #[serde(default)]
    pub performance_impact: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub user_id: i64,
    pub username: String,
}

/// A comment on a model; `parent_id` makes it a reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub model_id: ModelId,
    #[serde(default)]
    pub author: Option<CommentAuthor>,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}
