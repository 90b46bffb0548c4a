use lords::{LordsApp, ModelId, ModelRepository, VoteValue};

use crate::error::CliError;

pub async fn vote(app: &LordsApp, id: i64, value: VoteValue) -> Result<(), CliError> {
    let mut model = app.models().repository().get_by_id(ModelId::new(id)).await?;

    match app.models().vote(&mut model, value).await {
        Ok(()) => {
            let icon = match value {
                VoteValue::Up => "👍",
                VoteValue::Down => "👎",
            };
            println!(
                "{} Vote recorded for {}: {} likes, {} dislikes",
                icon, model.name, model.likes, model.dislikes
            );
            Ok(())
        }
        Err(e) => {
            println!(
                "❌ Vote not recorded, counts unchanged: {} likes, {} dislikes",
                model.likes, model.dislikes
            );
            Err(e.into())
        }
    }
}
