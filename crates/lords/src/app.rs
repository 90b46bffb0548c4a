//! Application layer for the Lords client
//!
//! Wires configuration, the persisted session, the shared transport and the
//! repository-backed services into one handle the CLI (or any other front
//! end) holds for its lifetime.

use std::sync::Arc;
use tracing::debug;

use crate::api::Transport;
use crate::auth::AuthClient;
use crate::benchmark::{BenchmarkRepository, HttpBenchmarkRepository};
use crate::catalog::{HttpModelRepository, ModelRepository, ModelService};
use crate::config::LordsConfig;
use crate::discussion::{CommentRepository, HttpCommentRepository};
use crate::error::{LordsError, Result};
use crate::session::{FileSessionStore, InMemorySessionStore, SessionHandle, SessionStore};

/// The main Lords application
#[derive(Clone)]
pub struct LordsApp {
    config: LordsConfig,
    session: SessionHandle,
    models: ModelService,
    comments: Arc<dyn CommentRepository>,
    benchmarks: Arc<dyn BenchmarkRepository>,
    auth: AuthClient,
}

impl LordsApp {
    /// Create a new builder
    pub fn builder(config: LordsConfig) -> LordsAppBuilder {
        LordsAppBuilder::new(config)
    }

    pub fn config(&self) -> &LordsConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn models(&self) -> &ModelService {
        &self.models
    }

    pub fn comments(&self) -> &Arc<dyn CommentRepository> {
        &self.comments
    }

    pub fn benchmarks(&self) -> &Arc<dyn BenchmarkRepository> {
        &self.benchmarks
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }
}

/// Builder for [`LordsApp`]; anything not overridden talks to the REST API
pub struct LordsAppBuilder {
    config: LordsConfig,
    session_store: Option<Arc<dyn SessionStore>>,
    model_repository: Option<Arc<dyn ModelRepository>>,
    comment_repository: Option<Arc<dyn CommentRepository>>,
    benchmark_repository: Option<Arc<dyn BenchmarkRepository>>,
}

impl LordsAppBuilder {
    pub fn new(config: LordsConfig) -> Self {
        Self {
            config,
            session_store: None,
            model_repository: None,
            comment_repository: None,
            benchmark_repository: None,
        }
    }

    /// Persist the session somewhere other than `config.session_file`
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn model_repository(mut self, repository: Arc<dyn ModelRepository>) -> Self {
        self.model_repository = Some(repository);
        self
    }

    pub fn comment_repository(mut self, repository: Arc<dyn CommentRepository>) -> Self {
        self.comment_repository = Some(repository);
        self
    }

    pub fn benchmark_repository(mut self, repository: Arc<dyn BenchmarkRepository>) -> Self {
        self.benchmark_repository = Some(repository);
        self
    }

    /// Restore the session and build the application
    pub async fn build(self) -> Result<LordsApp> {
        if self.config.page_size == 0 {
            return Err(LordsError::Build("page_size must be at least 1".to_string()));
        }

        let store: Arc<dyn SessionStore> = match (self.session_store, &self.config.session_file) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(FileSessionStore::new(path)),
            (None, None) => Arc::new(InMemorySessionStore::new()),
        };
        let session = SessionHandle::init(store).await?;
        let transport = Transport::new(&self.config, session.clone())?;
        debug!(api_url = %transport.base_url(), authenticated = session.is_authenticated(), "Client ready");

        let model_repository: Arc<dyn ModelRepository> = match self.model_repository {
            Some(repository) => repository,
            None => Arc::new(HttpModelRepository::new(transport.clone())),
        };
        let comments: Arc<dyn CommentRepository> = match self.comment_repository {
            Some(repository) => repository,
            None => Arc::new(HttpCommentRepository::new(transport.clone())),
        };
        let benchmarks: Arc<dyn BenchmarkRepository> = match self.benchmark_repository {
            Some(repository) => repository,
            None => Arc::new(HttpBenchmarkRepository::new(transport.clone())),
        };

        Ok(LordsApp {
            models: ModelService::new(model_repository).with_page_size(self.config.page_size),
            comments,
            benchmarks,
            auth: AuthClient::new(transport),
            session,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryModelRepository, ListFilters};
    use crate::session::Session;
    use lords_core::AiModel;

    #[tokio::test]
    async fn test_app_builder_with_offline_catalog() {
        let config = LordsConfig {
            page_size: 2,
            ..Default::default()
        };
        let models = (1..=3).map(|id| AiModel::new(id, format!("Model {}", id)));
        let app = LordsApp::builder(config)
            .model_repository(Arc::new(InMemoryModelRepository::with_models(models)))
            .build()
            .await
            .unwrap();

        assert_eq!(app.models().page_size(), 2);
        assert!(!app.session().is_authenticated());

        let page = app.models().list_models(&ListFilters::page(1, 2)).await.unwrap();
        assert_eq!(page.models.len(), 2);
        assert_eq!(app.models().list_all(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_app_restores_session() {
        let store = Arc::new(InMemorySessionStore::with_session(Session {
            token: "persisted".to_string(),
            user: None,
        }));
        let app = LordsApp::builder(LordsConfig::default())
            .session_store(store)
            .build()
            .await
            .unwrap();

        assert_eq!(app.session().token().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn test_zero_page_size_rejected() {
        let config = LordsConfig {
            page_size: 0,
            ..Default::default()
        };
        let result = LordsApp::builder(config).build().await;
        assert!(matches!(result, Err(LordsError::Build(_))));
    }
}
