//! Catalog administration. Every handler checks the stored role before
//! calling the server; the server still has the final word.

use lords::catalog::{ModelDraft, NewMetric};
use lords::{LordsApp, METRIC_CANDIDATES, ModelId};

use crate::context::require_admin;
use crate::error::CliError;
use crate::render;

pub async fn admin_create(app: &LordsApp, draft: ModelDraft) -> Result<(), CliError> {
    require_admin(app)?;
    if draft.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
        return Err(CliError::InvalidInput("--name is required".to_string()));
    }
    let model = app.models().create_model(&draft).await?;
    println!("✅ Created {}", render::model_line(&model));
    Ok(())
}

pub async fn admin_update(app: &LordsApp, id: i64, draft: ModelDraft) -> Result<(), CliError> {
    require_admin(app)?;
    if draft == ModelDraft::default() {
        return Err(CliError::InvalidInput("nothing to update".to_string()));
    }
    let model = app.models().update_model(ModelId::new(id), &draft).await?;
    println!("✅ Updated {}", render::model_line(&model));
    Ok(())
}

pub async fn admin_delete(app: &LordsApp, id: i64) -> Result<(), CliError> {
    require_admin(app)?;
    app.models().delete_model(ModelId::new(id)).await?;
    println!("🗑️  Deleted model #{}", id);
    Ok(())
}

pub async fn admin_metric_list(app: &LordsApp, id: i64) -> Result<(), CliError> {
    require_admin(app)?;
    let metrics = app.models().list_metrics(ModelId::new(id)).await?;
    println!("{}", render::metrics(&metrics));
    Ok(())
}

pub async fn admin_metric_add(
    app: &LordsApp,
    id: i64,
    name: String,
    value: f64,
    confidence_level: Option<f64>,
) -> Result<(), CliError> {
    require_admin(app)?;
    if !METRIC_CANDIDATES.contains(&name.as_str()) {
        return Err(CliError::InvalidInput(format!(
            "unknown characteristic '{}', expected one of: {}",
            name,
            METRIC_CANDIDATES.join(", ")
        )));
    }
    let metric = app
        .models()
        .add_metric(
            ModelId::new(id),
            &NewMetric {
                characteristic_name: name,
                value,
                confidence_level,
            },
        )
        .await?;
    println!(
        "✅ Added {} = {} (id {})",
        metric.characteristic_name, metric.value, metric.characteristic_id
    );
    Ok(())
}

pub async fn admin_metric_delete(app: &LordsApp, id: i64, metric_id: i64) -> Result<(), CliError> {
    require_admin(app)?;
    app.models()
        .delete_metric(ModelId::new(id), metric_id)
        .await?;
    println!("🗑️  Deleted characteristic {} from model #{}", metric_id, id);
    Ok(())
}
