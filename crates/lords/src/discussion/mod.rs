//! Model comments and their single-level reply threads

pub mod http_repository;
pub mod in_memory_repository;
pub mod repository;
pub mod thread;

pub use http_repository::HttpCommentRepository;
pub use in_memory_repository::InMemoryCommentRepository;
pub use repository::{CommentRepository, NewComment};
pub use thread::{CommentThread, thread_comments};
