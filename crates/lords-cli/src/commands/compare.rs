use lords::compare::{ComparisonBoard, SelectionChange};
use lords::{LordsApp, ModelId, ModelRepository};

use crate::error::CliError;
use crate::render;

/// Select `ids` in order; a repeated id is an input error, not a deselect
fn select(ids: &[i64]) -> Result<ComparisonBoard, CliError> {
    let mut board = ComparisonBoard::new();
    for &id in ids {
        let id = ModelId::new(id);
        if board.selection().contains(id) {
            return Err(CliError::InvalidInput(format!("model {} was given twice", id)));
        }
        if board.toggle(id) == SelectionChange::Full {
            return Err(CliError::InvalidInput(
                "at most three models can be compared".to_string(),
            ));
        }
    }
    if board.selection().is_empty() {
        return Err(CliError::InvalidInput("pick at least one model".to_string()));
    }
    Ok(board)
}

pub async fn compare(app: &LordsApp, ids: Vec<i64>) -> Result<(), CliError> {
    let mut board = select(&ids)?;

    let mut models = Vec::with_capacity(board.selection().len());
    for id in board.selection().ids() {
        models.push(app.models().repository().get_by_id(*id).await?);
    }

    let ticket = board.begin();
    let comparison = app.models().compare(&models).await;
    board.publish(ticket, comparison);

    if let Some(comparison) = board.current() {
        println!("{}", render::comparison(comparison));
    }
    Ok(())
}
