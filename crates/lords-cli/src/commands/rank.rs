use lords::LordsApp;
use lords::ranking::{SortDirection, SortKey, SortState, top_n};
use lords::statistics::{category_distribution, summary, top_by_engagement};

use crate::error::CliError;
use crate::render;

/// Leaderboards shown under statistics
const TOP_ENGAGED: usize = 10;

pub async fn rank(
    app: &LordsApp,
    key: SortKey,
    direction: Option<SortDirection>,
    top: Option<usize>,
    category: Option<String>,
) -> Result<(), CliError> {
    let models = app.models().list_all(category.as_deref()).await?;

    let mut state = SortState::new(key);
    if let Some(direction) = direction {
        state.direction = direction;
    }
    let ranked = match top {
        Some(n) => top_n(&models, state.key, state.direction, n),
        None => state.apply(&models),
    };

    println!("🏆 Ranking by {} ({})", state.key, state.direction);
    println!("{}", render::ranking_table(&ranked));
    Ok(())
}

pub async fn stats(app: &LordsApp) -> Result<(), CliError> {
    let models = app.models().list_all(None).await?;
    println!(
        "{}",
        render::statistics(
            &summary(&models),
            &category_distribution(&models),
            &top_by_engagement(&models, TOP_ENGAGED),
        )
    );
    Ok(())
}
