//! Credential gateway — the remote authentication service boundary.
//!
//! ERROR HANDLING
//! ==============
//! Outcomes are a two-way split the controller relies on: a rejection is an
//! expected, named failure (bad credentials, duplicate email) whose reason
//! is shown to the user verbatim; a transport fault is any failure to get
//! an answer at all. Neither is ever raised past the controller.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use async_trait::async_trait;

use super::types::{ApiErrorBody, LoginRequest, RegisterRequest, SessionGrant};

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Why an authentication attempt produced no session.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The service declined the credentials or registration. Rendered as the
    /// bare reason so it can be surfaced to the user unchanged.
    #[error("{0}")]
    Rejected(String),
    /// The call failed to complete (connect/timeout/decode).
    #[error("network error: {0}")]
    Transport(String),
}

/// Remote authentication service. One attempt per call, no retries.
#[async_trait]
pub trait CredentialGateway: Send + Sync {
    /// Exchange credentials for a session grant.
    async fn authenticate(&self, email: &str, password: &str) -> Result<SessionGrant, GatewayError>;

    /// Register a new account and sign it in. New accounts are never admins.
    async fn register(&self, email: &str, password: &str, name: &str) -> Result<SessionGrant, GatewayError>;
}

/// Storefront API endpoint configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, no trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Load from `LUXORA_API_URL`, falling back to the local dev server.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("LUXORA_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
        }
    }
}

/// Real gateway talking to the storefront API over HTTP.
pub struct HttpCredentialGateway {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpCredentialGateway {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// POST a JSON body to `{base}{path}` and translate the response into
    /// the grant/rejection/transport split.
    async fn post_auth<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<SessionGrant, GatewayError> {
        let url = format!("{}{path}", self.config.base_url);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<SessionGrant>()
                .await
                .map_err(|e| GatewayError::Transport(e.to_string()));
        }

        // Non-2xx: prefer the server's own reason, fall back to the status.
        let reason = resp
            .json::<ApiErrorBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_else(|_| format!("authentication failed ({status})"));
        Err(GatewayError::Rejected(reason))
    }
}

#[async_trait]
impl CredentialGateway for HttpCredentialGateway {
    async fn authenticate(&self, email: &str, password: &str) -> Result<SessionGrant, GatewayError> {
        self.post_auth("/auth/login", &LoginRequest { email, password })
            .await
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<SessionGrant, GatewayError> {
        self.post_auth("/auth/register", &RegisterRequest { email, password, name })
            .await
    }
}
