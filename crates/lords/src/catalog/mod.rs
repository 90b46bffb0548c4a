pub mod filters;
pub mod http_repository;
pub mod in_memory_repository;
pub mod repository;
pub mod service;

pub use filters::{ListFilters, ModelDraft, ModelPage, NewMetric, SearchFilters, filter_by_text};
pub use http_repository::HttpModelRepository;
pub use in_memory_repository::InMemoryModelRepository;
pub use repository::ModelRepository;
pub use service::ModelService;
