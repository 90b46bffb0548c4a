//! Server response shapes and their normalisation into domain types.
//!
//! The catalog backend is loose about its bodies: lists arrive bare, as
//! `{data}` or as `{data, pagination}`; numerics sometimes arrive as strings;
//! the category is an object, a bare name or flattened onto the model.
//! Everything is decoded here, right after the HTTP call, so nothing above
//! this module branches on response shape.

use lords_core::{
    AiModel, BenchmarkResult, Category, Comment, CommentAuthor, ModelId, ModelMetric,
    ModelVersion, User,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::{ApiError, ApiResult};

/// Pagination block some list endpoints attach
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(alias = "totalPages", alias = "pages")]
    pub total_pages: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Paged { data: Vec<T>, pagination: Pagination },
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemBody<T> {
    Wrapped { data: T },
    User { user: T },
    Bare(T),
}

pub(crate) fn decode_list<T: DeserializeOwned>(body: &[u8]) -> ApiResult<(Vec<T>, Option<Pagination>)> {
    let parsed: ListBody<T> = serde_json::from_slice(body)?;
    Ok(match parsed {
        ListBody::Paged { data, pagination } => (data, Some(pagination)),
        ListBody::Wrapped { data } => (data, None),
        ListBody::Bare(data) => (data, None),
    })
}

pub(crate) fn decode_item<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    let parsed: ItemBody<T> = serde_json::from_slice(body)?;
    Ok(match parsed {
        ItemBody::Wrapped { data } => data,
        ItemBody::User { user } => user,
        ItemBody::Bare(item) => item,
    })
}

/// A number that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Flex {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Flex {
    fn parse_f64(&self) -> Option<f64> {
        match self {
            Flex::Int(v) => Some(*v as f64),
            Flex::Float(v) => Some(*v),
            Flex::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Optional numbers: "NaN" and "Infinity" count as missing
    pub(crate) fn to_f64(&self) -> Option<f64> {
        self.parse_f64().filter(|v| v.is_finite())
    }

    /// Required measurements: non-finite values read as 0
    pub(crate) fn to_measure(&self) -> Option<f64> {
        self.parse_f64()
            .map(|v| if v.is_finite() { v } else { 0.0 })
    }

    pub(crate) fn to_i64(&self) -> Option<i64> {
        match self {
            Flex::Int(v) => Some(*v),
            Flex::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Flex::Float(_) => None,
            Flex::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|v| v.fract() == 0.0).map(|v| v as i64))
            }
        }
    }
}

fn require_id(field: &str, value: &Flex) -> ApiResult<i64> {
    value
        .to_i64()
        .ok_or_else(|| ApiError::Decode(format!("{} is not an integer: {:?}", field, value)))
}

fn count(value: &Option<Flex>) -> i64 {
    value.as_ref().and_then(Flex::to_i64).unwrap_or(0)
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireCategory {
    Object {
        #[serde(default, alias = "id")]
        category_id: Option<Flex>,
        #[serde(alias = "name")]
        category_name: String,
    },
    Name(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireModel {
    #[serde(alias = "id")]
    model_id: Flex,
    name: String,
    #[serde(default)]
    developer: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    category: Option<WireCategory>,
    #[serde(default)]
    category_id: Option<Flex>,
    #[serde(default)]
    category_name: Option<String>,
    #[serde(default)]
    score: Option<Flex>,
    #[serde(default)]
    vote_score: Option<Flex>,
    #[serde(default)]
    total_votes: Option<Flex>,
    #[serde(default)]
    likes: Option<Flex>,
    #[serde(default)]
    dislikes: Option<Flex>,
    #[serde(default, deserialize_with = "nullable_vec")]
    characteristics: Vec<WireMetric>,
    #[serde(default, deserialize_with = "nullable_vec")]
    benchmark_results: Vec<WireBenchmark>,
    #[serde(default, deserialize_with = "nullable_vec")]
    versions: Vec<ModelVersion>,
    #[serde(default, deserialize_with = "nullable_vec")]
    comments: Vec<WireComment>,
}

impl WireModel {
    pub(crate) fn into_model(self) -> ApiResult<AiModel> {
        let model_id = ModelId::new(require_id("model_id", &self.model_id)?);
        let flat_id = self.category_id.as_ref().and_then(Flex::to_i64);

        let category = match self.category {
            Some(WireCategory::Object {
                category_id,
                category_name,
            }) => Some(Category::new(
                category_id.as_ref().and_then(Flex::to_i64).or(flat_id),
                category_name,
            )),
            Some(WireCategory::Name(name)) => Some(Category::new(flat_id, name)),
            None => self
                .category_name
                .map(|name| Category::new(flat_id, name)),
        };

        let characteristics = self
            .characteristics
            .into_iter()
            .map(|m| m.into_metric(model_id))
            .collect::<ApiResult<Vec<_>>>()?;
        let benchmark_results = self
            .benchmark_results
            .into_iter()
            .map(WireBenchmark::into_result)
            .collect::<ApiResult<Vec<_>>>()?;
        let comments = self
            .comments
            .into_iter()
            .map(|c| c.into_comment(model_id))
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(AiModel {
            model_id,
            name: self.name,
            developer: self.developer.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            release_date: self.release_date,
            category,
            score: self.score.as_ref().and_then(Flex::to_f64),
            vote_score: count(&self.vote_score),
            total_votes: count(&self.total_votes),
            likes: count(&self.likes),
            dislikes: count(&self.dislikes),
            characteristics,
            benchmark_results,
            versions: self.versions,
            comments,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMetric {
    #[serde(alias = "id", alias = "metric_id")]
    characteristic_id: Flex,
    #[serde(default)]
    model_id: Option<Flex>,
    #[serde(alias = "name", alias = "metric")]
    characteristic_name: String,
    value: Flex,
    #[serde(default)]
    confidence_level: Option<Flex>,
    #[serde(default)]
    created_at: Option<String>,
}

impl WireMetric {
    /// `owner` fills in `model_id` when the body leaves it out
    pub(crate) fn into_metric(self, owner: ModelId) -> ApiResult<ModelMetric> {
        let model_id = match &self.model_id {
            Some(id) => ModelId::new(require_id("model_id", id)?),
            None => owner,
        };
        let value = self.value.to_measure().ok_or_else(|| {
            ApiError::Decode(format!(
                "metric '{}' has a non-numeric value",
                self.characteristic_name
            ))
        })?;

        Ok(ModelMetric {
            characteristic_id: require_id("characteristic_id", &self.characteristic_id)?,
            model_id,
            characteristic_name: self.characteristic_name,
            value,
            confidence_level: self.confidence_level.as_ref().and_then(Flex::to_f64),
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireBenchmark {
    #[serde(alias = "id")]
    benchmark_id: Flex,
    #[serde(default, alias = "name")]
    benchmark_name: Option<String>,
    score: Flex,
    #[serde(default)]
    execution_time: Option<Flex>,
    #[serde(default)]
    memory_usage: Option<Flex>,
    #[serde(default)]
    test_date: Option<String>,
}

impl WireBenchmark {
    pub(crate) fn into_result(self) -> ApiResult<BenchmarkResult> {
        let score = self
            .score
            .to_measure()
            .ok_or_else(|| ApiError::Decode("benchmark score is not numeric".to_string()))?;

        Ok(BenchmarkResult {
            benchmark_id: require_id("benchmark_id", &self.benchmark_id)?,
            benchmark_name: self.benchmark_name.unwrap_or_default(),
            score,
            execution_time: self.execution_time.as_ref().and_then(Flex::to_f64),
            memory_usage: self.memory_usage.as_ref().and_then(Flex::to_f64),
            test_date: self.test_date.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireAuthor {
    #[serde(alias = "id")]
    user_id: Flex,
    username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireComment {
    #[serde(alias = "id")]
    comment_id: Flex,
    #[serde(default)]
    model_id: Option<Flex>,
    #[serde(default, alias = "author")]
    user: Option<WireAuthor>,
    #[serde(default)]
    user_id: Option<Flex>,
    #[serde(default)]
    username: Option<String>,
    content: String,
    #[serde(default)]
    parent_id: Option<Flex>,
    #[serde(default)]
    created_at: Option<String>,
}

impl WireComment {
    /// For bodies reached without a model in the path
    pub(crate) fn into_standalone_comment(self) -> ApiResult<Comment> {
        let owner = self
            .model_id
            .as_ref()
            .map(|id| require_id("model_id", id))
            .transpose()?
            .ok_or_else(|| ApiError::Decode("comment has no model_id".to_string()))?;
        self.into_comment(ModelId::new(owner))
    }

    pub(crate) fn into_comment(self, owner: ModelId) -> ApiResult<Comment> {
        let model_id = match &self.model_id {
            Some(id) => ModelId::new(require_id("model_id", id)?),
            None => owner,
        };

        let author = match (self.user, self.user_id, self.username) {
            (Some(user), _, _) => Some(CommentAuthor {
                user_id: require_id("user_id", &user.user_id)?,
                username: user.username,
            }),
            (None, Some(id), Some(username)) => Some(CommentAuthor {
                user_id: require_id("user_id", &id)?,
                username,
            }),
            _ => None,
        };

        Ok(Comment {
            comment_id: require_id("comment_id", &self.comment_id)?,
            model_id,
            author,
            content: self.content,
            parent_id: self.parent_id.as_ref().and_then(Flex::to_i64),
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCategoryRow(WireCategory);

impl WireCategoryRow {
    pub(crate) fn into_category(self) -> Category {
        match self.0 {
            WireCategory::Object {
                category_id,
                category_name,
            } => Category::new(category_id.as_ref().and_then(Flex::to_i64), category_name),
            WireCategory::Name(name) => Category::new(None, name),
        }
    }
}

/// Login/register response
#[derive(Debug, Deserialize)]
pub(crate) struct WireAuth {
    pub(crate) user: User,
    #[serde(default)]
    pub(crate) token: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}
