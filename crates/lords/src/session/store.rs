use async_trait::async_trait;
use std::sync::RwLock;

use super::{Session, SessionError, SessionResult};

/// Persistence for the auth session between runs
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, if any
    async fn load(&self) -> SessionResult<Option<Session>>;

    /// Persist the session, replacing any previous one
    async fn save(&self, session: &Session) -> SessionResult<()>;

    /// Remove the persisted session; clearing an empty store is not an error
    async fn clear(&self) -> SessionResult<()>;
}

/// Process-local store for tests and one-shot runs
#[derive(Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> SessionResult<Option<Session>> {
        let session = self.session.read().map_err(|e| {
            SessionError::Lock(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(session.clone())
    }

    async fn save(&self, session: &Session) -> SessionResult<()> {
        let mut slot = self.session.write().map_err(|e| {
            SessionError::Lock(format!("Failed to acquire write lock: {}", e))
        })?;
        *slot = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        let mut slot = self.session.write().map_err(|e| {
            SessionError::Lock(format!("Failed to acquire write lock: {}", e))
        })?;
        *slot = None;
        Ok(())
    }
}
