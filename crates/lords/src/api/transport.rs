//! Authenticated JSON transport over reqwest.
//!
//! Every repository client goes through here: the bearer token is attached
//! from the injected [`SessionHandle`], non-success statuses become
//! [`ApiError`]s, and a 401 tears the session down exactly once, here.

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::server_message;
use super::{ApiError, ApiResult};
use crate::config::LordsConfig;
use crate::session::SessionHandle;

/// Shown for a 401 whose body carries no message
const SESSION_REJECTED: &str = "Session expired or invalid, please log in again";

#[derive(Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl Transport {
    /// Build a transport from configuration
    pub fn new(config: &LordsConfig, session: SessionHandle) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.base_url(), session))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, session: SessionHandle) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Vec<u8>> {
        let builder = self.request(Method::GET, path).query(query);
        self.send(builder, Method::GET, path).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Vec<u8>> {
        let builder = self.request(Method::POST, path).json(body);
        self.send(builder, Method::POST, path).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Vec<u8>> {
        let builder = self.request(Method::PUT, path).json(body);
        self.send(builder, Method::PUT, path).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Vec<u8>> {
        let builder = self.request(Method::DELETE, path);
        self.send(builder, Method::DELETE, path).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, method: Method, path: &str) -> ApiResult<Vec<u8>> {
        debug!(%method, path, "Sending request");

        let response = builder.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "Request failed before a response");
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(%method, path, status = status.as_u16(), bytes = body.len(), "Received response");

        if status.is_success() {
            return Ok(body);
        }

        if status.as_u16() == 401 {
            let message = server_message(&body, SESSION_REJECTED);
            warn!(%method, path, reason = %message, "Unauthorized, clearing session");
            if let Err(e) = self.session.teardown().await {
                warn!(error = %e, "Failed to clear persisted session");
            }
            return Err(ApiError::Unauthorized { message });
        }

        let fallback = status.canonical_reason().unwrap_or("Request failed");
        let message = server_message(&body, fallback);
        warn!(%method, path, status = status.as_u16(), reason = %message, "Request rejected");
        Err(ApiError::from_status(status.as_u16(), message))
    }
}
