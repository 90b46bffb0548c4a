use lords::discussion::{CommentRepository, NewComment, thread_comments};
use lords::{LordsApp, ModelId};

use crate::error::CliError;
use crate::render;

/// List a model's discussion, optionally posting first
pub async fn comments(
    app: &LordsApp,
    id: i64,
    add: Option<String>,
    reply_to: Option<i64>,
) -> Result<(), CliError> {
    let id = ModelId::new(id);

    if let Some(content) = add {
        if content.trim().is_empty() {
            return Err(CliError::InvalidInput("comment cannot be empty".to_string()));
        }
        let comment = match reply_to {
            Some(parent) => NewComment::reply(parent, content),
            None => NewComment::top_level(content),
        };
        let posted = app.comments().add(id, &comment).await?;
        println!("💬 Posted comment #{}", posted.comment_id);
    } else if reply_to.is_some() {
        return Err(CliError::InvalidInput("--reply-to needs --add".to_string()));
    }

    let comments = app.comments().list(id).await?;
    println!("{}", render::threads(&thread_comments(&comments)));
    Ok(())
}
