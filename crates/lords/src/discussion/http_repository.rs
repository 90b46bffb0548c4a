use async_trait::async_trait;
use lords_core::{Comment, ModelId};
use serde_json::json;

use super::{CommentRepository, NewComment};
use crate::api::wire::{WireComment, decode_item, decode_list};
use crate::api::{ApiResult, Transport};

#[derive(Clone)]
pub struct HttpCommentRepository {
    transport: Transport,
}

impl HttpCommentRepository {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CommentRepository for HttpCommentRepository {
    async fn list(&self, model_id: ModelId) -> ApiResult<Vec<Comment>> {
        let body = self
            .transport
            .get(&format!("models/{}/comments", model_id), &[])
            .await?;
        let (wire, _) = decode_list::<WireComment>(&body)?;
        wire.into_iter().map(|c| c.into_comment(model_id)).collect()
    }

    async fn add(&self, model_id: ModelId, comment: &NewComment) -> ApiResult<Comment> {
        let body = self
            .transport
            .post(&format!("models/{}/comments", model_id), comment)
            .await?;
        decode_item::<WireComment>(&body)?.into_comment(model_id)
    }

    async fn update(&self, comment_id: i64, content: &str) -> ApiResult<Comment> {
        let body = self
            .transport
            .put(
                &format!("comments/{}", comment_id),
                &json!({ "content": content }),
            )
            .await?;
        decode_item::<WireComment>(&body)?.into_standalone_comment()
    }

    async fn delete(&self, comment_id: i64) -> ApiResult<()> {
        self.transport
            .delete(&format!("comments/{}", comment_id))
            .await?;
        Ok(())
    }
}
