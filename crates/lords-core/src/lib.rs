//! # Lords of AI core types
//!
//! Domain entities shared by the catalog client, the engines and the CLI.

pub mod error;
pub mod model;
pub mod types;
pub mod user;

pub use error::{CoreError, Result};
pub use model::{
    AiModel, BenchmarkResult, Category, Comment, CommentAuthor, METRIC_CANDIDATES, ModelMetric,
    ModelVersion,
};
pub use types::{ModelId, VoteValue};
pub use user::{Role, User};
