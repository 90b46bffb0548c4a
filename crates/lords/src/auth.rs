//! Login, registration and profile calls against `/users/*`.

use lords_core::User;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::wire::{WireAuth, decode_item};
use crate::api::{ApiError, Transport};
use crate::error::Result;
use crate::session::{Session, SessionHandle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCredentials {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Partial profile update; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Clone)]
pub struct AuthClient {
    transport: Transport,
}

impl AuthClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn session(&self) -> &SessionHandle {
        self.transport.session()
    }

    /// Log in and persist the issued token
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User> {
        let body = self.transport.post("users/login", credentials).await?;
        let auth: WireAuth = serde_json::from_slice(&body).map_err(ApiError::from)?;
        let token = auth
            .token
            .ok_or_else(|| ApiError::Decode("login response carried no token".to_string()))?;

        self.session()
            .establish(Session {
                token,
                user: Some(auth.user.clone()),
            })
            .await?;
        Ok(auth.user)
    }

    /// Create an account; logs in as well when the server issues a token
    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<User> {
        let body = self.transport.post("users/register", credentials).await?;
        let auth: WireAuth = serde_json::from_slice(&body).map_err(ApiError::from)?;

        match auth.token {
            Some(token) => {
                self.session()
                    .establish(Session {
                        token,
                        user: Some(auth.user.clone()),
                    })
                    .await?
            }
            None => info!(
                user = %auth.user.username,
                notice = auth.message.as_deref().unwrap_or_default(),
                "Registered without a session"
            ),
        }
        Ok(auth.user)
    }

    /// Current user, refreshed into the session
    pub async fn profile(&self) -> Result<User> {
        let body = self.transport.get("users/profile", &[]).await?;
        let user: User = decode_item(&body)?;
        self.session().refresh_user(user.clone()).await?;
        Ok(user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let body = self.transport.put("users/profile", update).await?;
        let user: User = decode_item(&body)?;
        self.session().refresh_user(user.clone()).await?;
        Ok(user)
    }

    /// Ask the server whether the stored token is still valid.
    ///
    /// Without a token this is `false` without a request. A 401 has already
    /// torn the session down by the time this returns `false`.
    pub async fn verify(&self) -> Result<bool> {
        if !self.session().is_authenticated() {
            return Ok(false);
        }
        match self.transport.get("users/verify", &[]).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_unauthorized() => {
                debug!("Stored token rejected");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Forget the session locally; the server keeps no session state
    pub async fn logout(&self) -> Result<()> {
        self.session().teardown().await?;
        Ok(())
    }
}
