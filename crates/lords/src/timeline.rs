//! Version history and benchmark history ordering, plus date display.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lords_core::{BenchmarkResult, ModelVersion};
use serde::Serialize;

/// Parse the date part of an ISO date or datetime as sent by the server
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map(|dt| dt.date())
        .ok()
}

/// Long-form display date; unparsable input is returned unchanged
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%-d %B %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Newest release first; versions with unparsable dates go last
pub fn sort_versions(versions: &[ModelVersion]) -> Vec<ModelVersion> {
    let mut sorted = versions.to_vec();
    sorted.sort_by(|a, b| {
        let a = parse_date(&a.release_date);
        let b = parse_date(&b.release_date);
        b.cmp(&a)
    });
    sorted
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSeries {
    pub benchmark_name: String,
    /// Oldest first
    pub points: Vec<BenchmarkResult>,
}

impl BenchmarkSeries {
    pub fn latest(&self) -> Option<&BenchmarkResult> {
        self.points.last()
    }
}

/// Group results per benchmark (first-appearance order), each oldest to newest
pub fn benchmark_history(results: &[BenchmarkResult]) -> Vec<BenchmarkSeries> {
    let mut series: Vec<BenchmarkSeries> = Vec::new();
    for result in results {
        match series
            .iter_mut()
            .find(|s| s.benchmark_name == result.benchmark_name)
        {
            Some(existing) => existing.points.push(result.clone()),
            None => series.push(BenchmarkSeries {
                benchmark_name: result.benchmark_name.clone(),
                points: vec![result.clone()],
            }),
        }
    }

    for s in &mut series {
        s.points
            .sort_by(|a, b| parse_date(&a.test_date).cmp(&parse_date(&b.test_date)));
    }
    series
}
