use lords::LordsApp;
use lords::export::{ExportFormat, rows, write_export};
use lords::ranking::{SortKey, SortState};
use std::path::PathBuf;

use crate::error::CliError;

/// Export the whole catalog in ranking order
pub async fn export(
    app: &LordsApp,
    format: ExportFormat,
    output: Option<PathBuf>,
    key: SortKey,
) -> Result<(), CliError> {
    let models = app.models().list_all(None).await?;
    let ranked: Vec<_> = SortState::new(key)
        .apply(&models)
        .into_iter()
        .map(|r| r.model)
        .collect();

    let path = output.unwrap_or_else(|| PathBuf::from(format!("rankings.{}", format.extension())));
    write_export(&path, format, &rows(&ranked)).await?;
    println!("💾 Exported {} models to {}", ranked.len(), path.display());
    Ok(())
}
