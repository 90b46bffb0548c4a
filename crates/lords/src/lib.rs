//! Main crate for the Lords of AI catalog client
//!
//! Provides the REST repository clients for models, metrics, votes, comments
//! and benchmarks, the explicit session lifecycle, and the pure engines that
//! turn fetched data into comparison series, rankings and statistics.

pub mod api;
pub mod app;
pub mod auth;
pub mod benchmark;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod discussion;
pub mod error;
pub mod export;
pub mod guard;
pub mod ranking;
pub mod session;
pub mod statistics;
pub mod timeline;
pub mod vote;

// Re-export core types
pub use lords_core::{
    AiModel, BenchmarkResult, Category, Comment, CommentAuthor, CoreError, METRIC_CANDIDATES,
    ModelId, ModelMetric, ModelVersion, Role, User, VoteValue,
};

// Re-export app types
pub use app::{LordsApp, LordsAppBuilder};

// Re-export client types
pub use api::{ApiError, ApiResult, RequestError, Transport};
pub use catalog::{ModelPage, ModelRepository, ModelService};

// Re-export error types
pub use error::{LordsError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::LordsApp;
    pub use crate::compare::{Comparison, MetricFetch, build_comparison, humanize};
    pub use crate::ranking::{SortDirection, SortKey, SortState, rank, top_n};
    pub use crate::vote::{PendingVote, VoteEvent, apply_vote};
    pub use lords_core::{AiModel, ModelId, ModelMetric, VoteValue};
}
