use async_trait::async_trait;
use lords_core::{Comment, CommentAuthor, ModelId};
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{CommentRepository, NewComment};
use crate::api::{ApiError, ApiResult};

/// In-memory comment store for offline use and tests
pub struct InMemoryCommentRepository {
    comments: RwLock<Vec<Comment>>,
    next_id: AtomicI64,
    author: Option<CommentAuthor>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            author: None,
        }
    }

    /// Stamp new comments with `author`
    pub fn as_author(mut self, author: CommentAuthor) -> Self {
        self.author = Some(author);
        self
    }

    fn lock_error(message: String) -> ApiError {
        ApiError::Server {
            status: 500,
            message,
        }
    }
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(comment_id: i64) -> ApiError {
    ApiError::NotFound(format!("Comment {} not found", comment_id))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list(&self, model_id: ModelId) -> ApiResult<Vec<Comment>> {
        let comments = self
            .comments
            .read()
            .map_err(|e| Self::lock_error(format!("Failed to acquire read lock: {}", e)))?;
        Ok(comments
            .iter()
            .filter(|c| c.model_id == model_id)
            .cloned()
            .collect())
    }

    async fn add(&self, model_id: ModelId, comment: &NewComment) -> ApiResult<Comment> {
        if comment.content.trim().is_empty() {
            return Err(ApiError::Client {
                status: 400,
                message: "Comment content is required".to_string(),
            });
        }

        let mut comments = self
            .comments
            .write()
            .map_err(|e| Self::lock_error(format!("Failed to acquire write lock: {}", e)))?;
        if let Some(parent) = comment.parent_id {
            if !comments
                .iter()
                .any(|c| c.comment_id == parent && c.model_id == model_id)
            {
                return Err(missing(parent));
            }
        }

        let created = Comment {
            comment_id: self.next_id.fetch_add(1, Ordering::SeqCst),
            model_id,
            author: self.author.clone(),
            content: comment.content.clone(),
            parent_id: comment.parent_id,
            created_at: None,
        };
        comments.push(created.clone());
        Ok(created)
    }

    async fn update(&self, comment_id: i64, content: &str) -> ApiResult<Comment> {
        let mut comments = self
            .comments
            .write()
            .map_err(|e| Self::lock_error(format!("Failed to acquire write lock: {}", e)))?;
        let comment = comments
            .iter_mut()
            .find(|c| c.comment_id == comment_id)
            .ok_or_else(|| missing(comment_id))?;
        comment.content = content.to_string();
        Ok(comment.clone())
    }

    async fn delete(&self, comment_id: i64) -> ApiResult<()> {
        let mut comments = self
            .comments
            .write()
            .map_err(|e| Self::lock_error(format!("Failed to acquire write lock: {}", e)))?;
        let before = comments.len();
        comments.retain(|c| c.comment_id != comment_id);
        if comments.len() == before {
            return Err(missing(comment_id));
        }
        Ok(())
    }
}
