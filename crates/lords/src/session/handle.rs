//! Explicit session object shared by the transport and the auth flow.
//!
//! The handle is created once at start-up (`init` reads the persisted token)
//! and cloned into whatever needs it. Only login/register (`establish`) and
//! logout or a 401 (`teardown`) write to it.

use lords_core::User;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use super::{InMemorySessionStore, SessionError, SessionResult, SessionStore};

/// An authenticated session: bearer token plus the user it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone)]
pub struct SessionHandle {
    current: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl SessionHandle {
    /// Restore the persisted session from `store`
    pub async fn init(store: Arc<dyn SessionStore>) -> SessionResult<Self> {
        let restored = store.load().await?;
        if restored.is_some() {
            debug!("Restored persisted session");
        }
        Ok(Self {
            current: Arc::new(RwLock::new(restored)),
            store,
        })
    }

    /// A handle with no session and nothing persisted
    pub fn anonymous() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store: Arc::new(InMemorySessionStore::new()),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.read().ok().and_then(|s| s.as_ref().map(|s| s.token.clone()))
    }

    pub fn user(&self) -> Option<User> {
        self.read()
            .ok()
            .and_then(|s| s.as_ref().and_then(|s| s.user.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|u| u.is_admin())
    }

    /// Persist and activate a freshly issued session
    pub async fn establish(&self, session: Session) -> SessionResult<()> {
        self.store.save(&session).await?;
        info!(
            user = session.user.as_ref().map(|u| u.username.as_str()),
            "Session established"
        );
        *self.write()? = Some(session);
        Ok(())
    }

    /// Replace the cached user without touching the token
    pub async fn refresh_user(&self, user: User) -> SessionResult<()> {
        let updated = {
            let mut current = self.write()?;
            match current.as_mut() {
                Some(session) => {
                    session.user = Some(user);
                    Some(session.clone())
                }
                None => None,
            }
        };
        if let Some(session) = updated {
            self.store.save(&session).await?;
        }
        Ok(())
    }

    /// Forget the session in memory and in the store
    pub async fn teardown(&self) -> SessionResult<()> {
        let had_session = self.write()?.take().is_some();
        self.store.clear().await?;
        if had_session {
            info!("Session cleared");
        }
        Ok(())
    }

    fn read(&self) -> SessionResult<std::sync::RwLockReadGuard<'_, Option<Session>>> {
        self.current
            .read()
            .map_err(|e| SessionError::Lock(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> SessionResult<std::sync::RwLockWriteGuard<'_, Option<Session>>> {
        self.current
            .write()
            .map_err(|e| SessionError::Lock(format!("Failed to acquire write lock: {}", e)))
    }
}
