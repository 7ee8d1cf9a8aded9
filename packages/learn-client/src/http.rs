//! Authenticated HTTP wrapper around the learn API.
//!
//! Every call runs through two hooks: the request side attaches
//! `Authorization: Bearer <token>` when the session holds a token, and the
//! response side turns non-2xx statuses into [`ClientError::Request`]. A 401
//! on any path not covered by the [`UnauthorizedPolicy`] clears the session
//! and marks the error with [`Navigation::Login`].

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Navigation, Result};
use crate::session::SessionStore;
use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
use crate::types::{ApiRequest, ApiResponse, Method};

/// Decides which 401 responses invalidate the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthorizedPolicy {
    exempt_path_fragments: Vec<String>,
}

impl Default for UnauthorizedPolicy {
    /// A wrong current password on a password change answers 401 but must
    /// not end the session that made the request.
    fn default() -> Self {
        Self {
            exempt_path_fragments: vec!["/password".to_string()],
        }
    }
}

impl UnauthorizedPolicy {
    /// Every 401 invalidates the session.
    pub fn strict() -> Self {
        Self {
            exempt_path_fragments: Vec::new(),
        }
    }

    /// Also exempt paths containing `fragment`.
    pub fn exempt(mut self, fragment: impl Into<String>) -> Self {
        self.exempt_path_fragments.push(fragment.into());
        self
    }

    pub fn invalidates_session(&self, path: &str) -> bool {
        !self
            .exempt_path_fragments
            .iter()
            .any(|fragment| path.contains(fragment.as_str()))
    }
}

/// HTTP client bound to one base URL and one session.
#[derive(Clone)]
pub struct HttpClient {
    config: ClientConfig,
    session: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
    policy: UnauthorizedPolicy,
}

impl HttpClient {
    /// Create a client that talks to the network through reqwest.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, session, Arc::new(transport)))
    }

    /// Create from environment variables (see [`ClientConfig::from_env`]).
    pub fn from_env(session: Arc<dyn SessionStore>) -> Result<Self> {
        Self::new(ClientConfig::from_env()?, session)
    }

    pub fn with_transport(
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            session,
            transport,
            policy: UnauthorizedPolicy::default(),
        }
    }

    pub fn with_unauthorized_policy(mut self, policy: UnauthorizedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::Get, path)).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        self.send(with_optional_body(ApiRequest::new(Method::Post, path), body))
            .await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        self.send(with_optional_body(ApiRequest::new(Method::Put, path), body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }

    /// Send a request through both hooks.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let outgoing = self.prepare(&request)?;
        let resp = self.transport.execute(outgoing).await?;
        self.handle_response(&request.path, resp)
    }

    fn prepare(&self, request: &ApiRequest) -> Result<TransportRequest> {
        let mut headers = Vec::new();
        let token = self.session.token()?;
        if let Some(token) = &token {
            headers.push((AUTHORIZATION.as_str().to_string(), format!("Bearer {}", token)));
        }

        debug!(
            method = %request.method,
            path = %request.path,
            authenticated = token.is_some(),
            "Sending API request"
        );

        Ok(TransportRequest {
            method: request.method,
            url: self.config.url_for(&request.path),
            headers,
            body: request.body.clone(),
        })
    }

    fn handle_response(&self, path: &str, resp: TransportResponse) -> Result<ApiResponse> {
        if (200..300).contains(&resp.status) {
            return Ok(ApiResponse::from_body(resp.status, &resp.body));
        }

        let mut navigation = None;
        if resp.status == 401 {
            if self.policy.invalidates_session(path) {
                warn!(path, "Unauthorized response, clearing session");
                if let Err(e) = self.session.clear() {
                    warn!(path, error = %e, "Failed to clear session after 401");
                }
                navigation = Some(Navigation::Login(self.config.login_path.clone()));
            } else {
                debug!(path, "Unauthorized response on exempt path, session kept");
            }
        }

        Err(ClientError::Request {
            status: resp.status,
            body: resp.body,
            path: path.to_string(),
            navigation,
        })
    }
}

fn with_optional_body(request: ApiRequest, body: Option<Value>) -> ApiRequest {
    match body {
        Some(body) => request.with_body(body),
        None => request,
    }
}
