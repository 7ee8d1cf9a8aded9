//! Error types for the learn client.

use thiserror::Error;

/// Result type for learn client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Where the application should send the user after a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The session was invalidated; show the login view at this path.
    Login(String),
}

impl Navigation {
    pub fn path(&self) -> &str {
        match self {
            Navigation::Login(path) => path,
        }
    }
}

/// Learn client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No logged-in user in the local session
    #[error("Auth error: {0}")]
    Auth(String),

    /// Server answered with a non-2xx status
    #[error("Request to {path} failed with status {status}: {body}")]
    Request {
        status: u16,
        body: String,
        path: String,
        navigation: Option<Navigation>,
    },

    /// No response received (connection refused, timeout, broken body)
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error (bad base URL, unparsable setting)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Session store could not be read or written
    #[error("Session error: {0}")]
    Session(String),
}

impl ClientError {
    pub fn not_logged_in() -> Self {
        ClientError::Auth("user not logged in".into())
    }

    /// HTTP status of a server-side failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of a server-side failure.
    pub fn body(&self) -> Option<&str> {
        match self {
            ClientError::Request { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Navigation the caller should perform, if the failure invalidated the session.
    pub fn navigation(&self) -> Option<&Navigation> {
        match self {
            ClientError::Request { navigation, .. } => navigation.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}
