use lords::benchmark::BenchmarkRepository;
use lords::timeline::benchmark_history;
use lords::{LordsApp, ModelId};

use crate::error::CliError;
use crate::render;

pub async fn benchmarks(app: &LordsApp, id: i64, benchmark: Option<i64>) -> Result<(), CliError> {
    let id = ModelId::new(id);
    let results = match benchmark {
        Some(benchmark_id) => app.benchmarks().history(id, benchmark_id).await?,
        None => app.benchmarks().list(id).await?,
    };

    if results.is_empty() {
        println!("No benchmark results.");
    } else {
        println!("{}", render::benchmark_series(&benchmark_history(&results)));
    }
    Ok(())
}
