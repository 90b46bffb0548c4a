use lords::benchmark::BenchmarkRepository;
use lords::catalog::{ListFilters, SearchFilters, filter_by_text};
use lords::timeline::benchmark_history;
use lords::{LordsApp, ModelId};
use tracing::warn;

use crate::error::CliError;
use crate::render;

#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub category: Option<String>,
    pub page: u32,
    pub limit: Option<u32>,
    /// Fetch every page instead of one
    pub all: bool,
    /// Local name/description filter
    pub query: Option<String>,
}

pub async fn list(app: &LordsApp, args: ListArgs) -> Result<(), CliError> {
    let models = if args.all {
        app.models().list_all(args.category.as_deref()).await?
    } else {
        let limit = args.limit.unwrap_or(app.models().page_size());
        let mut filters = ListFilters::page(args.page, limit);
        filters.category = args.category;
        let page = app.models().list_models(&filters).await?;
        if !page.is_last() {
            println!("(page {}, more with --page {})", page.page, page.page + 1);
        }
        page.models
    };

    let models = match &args.query {
        Some(query) => filter_by_text(&models, query),
        None => models,
    };
    println!("{}", render::model_list(&models));
    Ok(())
}

pub async fn search(app: &LordsApp, filters: SearchFilters) -> Result<(), CliError> {
    let page = app.models().search(&filters).await?;
    println!("{}", render::model_list(&page.models));
    if let Some(total) = page.pagination.as_ref().and_then(|p| p.total) {
        println!("({} matching)", total);
    }
    Ok(())
}

/// Model details; benchmark and comment failures degrade to a warning line
pub async fn show(app: &LordsApp, id: i64) -> Result<(), CliError> {
    let id = ModelId::new(id);
    let model = app.models().get_model_details(id).await?;

    let results = if model.benchmark_results.is_empty() {
        match app.benchmarks().list(id).await {
            Ok(results) => results,
            Err(e) => {
                warn!(model_id = %id, error = %e, "Benchmark fetch failed");
                println!("⚠️  Benchmarks unavailable: {}", e);
                Vec::new()
            }
        }
    } else {
        model.benchmark_results.clone()
    };

    println!("{}", render::model_details(&model, &benchmark_history(&results)));
    Ok(())
}
