//! Authenticated REST client for the learn course platform.
//!
//! Wraps the backend's enrollment and account endpoints behind a session-aware
//! HTTP client. The session (token + user) is injected at construction; a 401
//! from the server clears it and classifies the error so the application can
//! route the user back to the login view.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use learn_client::{DashboardService, FileSessionStore, HttpClient};
//!
//! let session = Arc::new(FileSessionStore::new(".learn-session.json"));
//! let dashboard = DashboardService::new(HttpClient::from_env(session)?);
//!
//! match dashboard.my_courses().await {
//!     Ok(courses) => println!("{} enrollments", courses.len()),
//!     Err(e) if e.navigation().is_some() => println!("session expired, please log in"),
//!     Err(e) => return Err(e),
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod session;
pub mod testing;
pub mod transport;
pub mod types;

pub use config::ClientConfig;
pub use dashboard::DashboardService;
pub use error::{ClientError, Navigation, Result};
pub use http::{HttpClient, UnauthorizedPolicy};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, SessionUser};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
pub use types::*;
