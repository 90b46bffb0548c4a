//! Plain-text rendering of fetched and computed data

use lords::compare::Comparison;
use lords::discussion::CommentThread;
use lords::ranking::RankedModel;
use lords::statistics::{CatalogSummary, CategoryShare};
use lords::timeline::{BenchmarkSeries, format_date, sort_versions};
use lords::{AiModel, Comment, ModelMetric};

const RULE: &str = "─────────────────────────────────────────";

fn score(model: &AiModel) -> String {
    model
        .score
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "-".to_string())
}

pub fn model_line(model: &AiModel) -> String {
    format!(
        "#{:<4} {:<28} {:<18} {:<14} score {:>6}  👍 {:<4} 👎 {}",
        model.model_id.as_i64(),
        model.name,
        model.developer,
        model.category_name().unwrap_or("-"),
        score(model),
        model.likes,
        model.dislikes
    )
}

pub fn model_list(models: &[AiModel]) -> String {
    if models.is_empty() {
        return "No models found.".to_string();
    }
    models.iter().map(model_line).collect::<Vec<_>>().join("\n")
}

pub fn ranking_table(ranked: &[RankedModel]) -> String {
    if ranked.is_empty() {
        return "No models to rank.".to_string();
    }
    ranked
        .iter()
        .map(|r| format!("{:>3}. {}", r.position, model_line(&r.model)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn metric_line(metric: &ModelMetric) -> String {
    let mut line = format!(
        "   [{}] {:<26} {:>7.2}",
        metric.characteristic_id, metric.characteristic_name, metric.value
    );
    if let Some(confidence) = metric.confidence_level {
        line.push_str(&format!("  (confidence {:.2})", confidence));
    }
    line
}

pub fn metrics(metrics: &[ModelMetric]) -> String {
    if metrics.is_empty() {
        return "   (no characteristics)".to_string();
    }
    metrics.iter().map(metric_line).collect::<Vec<_>>().join("\n")
}

pub fn model_details(model: &AiModel, benchmarks: &[BenchmarkSeries]) -> String {
    let mut out = vec![
        format!("📦 {} (#{})", model.name, model.model_id),
        RULE.to_string(),
        format!("Developer:    {}", model.developer),
        format!("Category:     {}", model.category_name().unwrap_or("-")),
        format!(
            "Released:     {}",
            model.release_date.as_deref().map(format_date).unwrap_or_else(|| "-".to_string())
        ),
        format!("Score:        {}", score(model)),
        format!(
            "Votes:        {} ({} 👍 / {} 👎, net {})",
            model.total_votes, model.likes, model.dislikes, model.vote_score
        ),
    ];
    if !model.description.is_empty() {
        out.push(String::new());
        out.push(model.description.clone());
    }

    out.push(String::new());
    out.push("Characteristics:".to_string());
    out.push(metrics(&model.characteristics));

    if !benchmarks.is_empty() {
        out.push(String::new());
        out.push("Benchmarks:".to_string());
        out.push(benchmark_series(benchmarks));
    }

    let versions = sort_versions(&model.versions);
    if !versions.is_empty() {
        out.push(String::new());
        out.push("Versions:".to_string());
        for version in versions {
            let marker = if version.is_major_update { "★" } else { "·" };
            let mut line = format!(
                "   {} {} ({})",
                marker,
                version.version_number,
                format_date(&version.release_date)
            );
            if let Some(changes) = &version.changes_description {
                line.push_str(&format!(": {}", changes));
            }
            out.push(line);
        }
    }
    out.join("\n")
}

pub fn benchmark_series(series: &[BenchmarkSeries]) -> String {
    series
        .iter()
        .map(|s| {
            let points = s
                .points
                .iter()
                .map(|p| format!("{} → {:.2}", format_date(&p.test_date), p.score))
                .collect::<Vec<_>>()
                .join(", ");
            format!("   {}: {}", s.benchmark_name, points)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn comparison(comparison: &Comparison) -> String {
    let mut out = Vec::new();
    if comparison.is_empty() {
        out.push("No characteristics to compare.".to_string());
    } else {
        let mut header = format!("{:<26}", "");
        for name in &comparison.series {
            header.push_str(&format!("{:>16}", name));
        }
        out.push(header);
        out.push(RULE.to_string());
        for row in &comparison.rows {
            let mut line = format!("{:<26}", row.axis.label);
            for name in &comparison.series {
                line.push_str(&format!("{:>16.1}", row.value(name).unwrap_or(0.0)));
            }
            out.push(line);
        }
    }
    for failure in &comparison.failures {
        out.push(format!(
            "⚠️  Could not load characteristics for {}: {}",
            failure.name, failure.reason
        ));
    }
    out.join("\n")
}

pub fn statistics(summary: &CatalogSummary, shares: &[CategoryShare], top: &[RankedModel]) -> String {
    let mut out = vec![
        format!("Models:      {}", summary.models),
        format!("Categories:  {}", summary.categories),
        format!(
            "Votes:       {} ({} 👍 / {} 👎)",
            summary.total_votes, summary.likes, summary.dislikes
        ),
        format!(
            "Mean score:  {}",
            summary
                .mean_score
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "-".to_string())
        ),
        String::new(),
        "By category:".to_string(),
    ];
    for share in shares {
        out.push(format!(
            "   {:<20} {:>4}  {:>5.1}%",
            share.name, share.count, share.percent
        ));
    }
    out.push(String::new());
    out.push("Most engaged:".to_string());
    out.push(ranking_table(top));
    out.join("\n")
}

fn comment_line(comment: &Comment, indent: &str) -> String {
    let author = comment
        .author
        .as_ref()
        .map(|a| a.username.as_str())
        .unwrap_or("anonymous");
    let when = comment
        .created_at
        .as_deref()
        .map(|d| format!(" · {}", format_date(d)))
        .unwrap_or_default();
    format!(
        "{}[{}] {}{}: {}",
        indent, comment.comment_id, author, when, comment.content
    )
}

pub fn threads(threads: &[CommentThread]) -> String {
    if threads.is_empty() {
        return "No comments yet.".to_string();
    }
    let mut out = Vec::new();
    for thread in threads {
        out.push(comment_line(&thread.root, ""));
        for reply in &thread.replies {
            out.push(comment_line(reply, "    ↳ "));
        }
    }
    out.join("\n")
}
