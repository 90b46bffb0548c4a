//! CLI command handlers

pub mod admin;
pub mod auth;
pub mod benchmarks;
pub mod catalog;
pub mod comments;
pub mod compare;
pub mod export;
pub mod rank;
pub mod vote;

pub use admin::{admin_create, admin_delete, admin_metric_add, admin_metric_delete, admin_metric_list, admin_update};
pub use auth::{login, logout, register, whoami};
pub use benchmarks::benchmarks;
pub use catalog::{ListArgs, list, search, show};
pub use comments::comments;
pub use compare::compare;
pub use export::export;
pub use rank::{rank, stats};
pub use vote::vote;
