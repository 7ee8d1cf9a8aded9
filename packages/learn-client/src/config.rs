use std::env;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub login_path: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("LEARN_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!(
                    "LEARN_HTTP_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let base_url = lookup("LEARN_API_BASE").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_path: lookup("LEARN_LOGIN_PATH")
                .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
        .with_base_url(base_url)
    }

    /// Set the base URL. Trailing slashes are dropped so paths join cleanly.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {url:?}"
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Absolute URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
