//! Session context: the auth token and logged-in user the client acts for.
//!
//! The store is injected into [`crate::HttpClient`] at construction. Login
//! happens elsewhere and writes the session through [`SessionStore::save`];
//! the client reads it on every request and clears it when the server
//! rejects the token.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{ClientError, Result};

/// The logged-in user. Only the id is required; anything else the login
/// endpoint returned is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_user",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<SessionUser>,
}

/// A stored user record without a usable id reads as no user, so the token
/// keeps working on its own.
fn lenient_user<'de, D>(deserializer: D) -> std::result::Result<Option<SessionUser>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "Ignoring unusable user record in session");
            None
        }
    }))
}

impl Session {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// Token to send, if any. An empty token counts as absent.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.bearer_token().is_none() && self.user.is_none()
    }
}

/// Key-value persistence for the session.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Session>;

    fn save(&self, session: &Session) -> Result<()>;

    /// Forget both the token and the user.
    fn clear(&self) -> Result<()>;

    fn token(&self) -> Result<Option<String>> {
        Ok(self.load()?.bearer_token().map(str::to_string))
    }

    fn user(&self) -> Result<Option<SessionUser>> {
        Ok(self.load()?.user)
    }
}

/// In-process session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }
}

fn poisoned<T>(_: T) -> ClientError {
    ClientError::Session("session lock poisoned".into())
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session> {
        Ok(self.inner.read().map_err(poisoned)?.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.inner.write().map_err(poisoned)? = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.write().map_err(poisoned)? = Session::default();
        Ok(())
    }
}

/// Session persisted as a JSON file. A missing file is an empty session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Session::default()),
            Err(e) => {
                return Err(ClientError::Session(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            ClientError::Session(format!("corrupt session file {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ClientError::Session(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Session(format!("failed to serialize session: {}", e)))?;
        fs::write(&self.path, raw).map_err(|e| {
            ClientError::Session(format!("failed to write {}: {}", self.path.display(), e))
        })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
