use async_trait::async_trait;
use lords_core::{Comment, ModelId};
use serde::{Deserialize, Serialize};

use crate::api::ApiResult;

/// A top-level comment, or a reply when `parent_id` is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
    pub parent_id: Option<i64>,
}

impl NewComment {
    pub fn top_level(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: None,
        }
    }

    pub fn reply(parent_id: i64, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: Some(parent_id),
        }
    }
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Get all comments on a model, oldest first
    async fn list(&self, model_id: ModelId) -> ApiResult<Vec<Comment>>;

    /// Post a comment or reply
    async fn add(&self, model_id: ModelId, comment: &NewComment) -> ApiResult<Comment>;

    /// Edit the text of a comment
    async fn update(&self, comment_id: i64, content: &str) -> ApiResult<Comment>;

    /// Delete a comment
    async fn delete(&self, comment_id: i64) -> ApiResult<()>;
}
