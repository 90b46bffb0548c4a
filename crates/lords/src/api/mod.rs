//! HTTP plumbing shared by every repository client

pub mod error;
pub mod transport;
pub(crate) mod wire;

pub use error::{ApiError, ApiResult, RequestError};
pub use transport::Transport;
pub use wire::Pagination;
