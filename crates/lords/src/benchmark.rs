//! Per-model benchmark results. Results are append-only.

use async_trait::async_trait;
use lords_core::{BenchmarkResult, ModelId};
use serde::{Deserialize, Serialize};

use crate::api::wire::{WireBenchmark, decode_item, decode_list};
use crate::api::{ApiResult, Transport};

/// Payload for recording a new run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBenchmarkResult {
    pub benchmark_id: i64,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<f64>,
}

#[async_trait]
pub trait BenchmarkRepository: Send + Sync {
    /// Get every result recorded for a model
    async fn list(&self, model_id: ModelId) -> ApiResult<Vec<BenchmarkResult>>;

    /// Record a new result
    async fn add(&self, model_id: ModelId, result: &NewBenchmarkResult) -> ApiResult<BenchmarkResult>;

    /// Get all runs of one benchmark for a model
    async fn history(&self, model_id: ModelId, benchmark_id: i64) -> ApiResult<Vec<BenchmarkResult>>;
}

#[derive(Clone)]
pub struct HttpBenchmarkRepository {
    transport: Transport,
}

impl HttpBenchmarkRepository {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn results(body: &[u8]) -> ApiResult<Vec<BenchmarkResult>> {
        let (wire, _) = decode_list::<WireBenchmark>(body)?;
        wire.into_iter().map(WireBenchmark::into_result).collect()
    }
}

#[async_trait]
impl BenchmarkRepository for HttpBenchmarkRepository {
    async fn list(&self, model_id: ModelId) -> ApiResult<Vec<BenchmarkResult>> {
        let body = self
            .transport
            .get(&format!("models/{}/benchmarks", model_id), &[])
            .await?;
        Self::results(&body)
    }

    async fn add(&self, model_id: ModelId, result: &NewBenchmarkResult) -> ApiResult<BenchmarkResult> {
        let body = self
            .transport
            .post(&format!("models/{}/benchmarks", model_id), result)
            .await?;
        decode_item::<WireBenchmark>(&body)?.into_result()
    }

    async fn history(&self, model_id: ModelId, benchmark_id: i64) -> ApiResult<Vec<BenchmarkResult>> {
        let body = self
            .transport
            .get(
                &format!("models/{}/benchmarks/{}/history", model_id, benchmark_id),
                &[],
            )
            .await?;
        Self::results(&body)
    }
}
