//! Testing utilities including a mock transport.
//!
//! These let applications exercise [`crate::HttpClient`] and
//! [`crate::DashboardService`] without touching the network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{ClientError, Result};
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// What the mock answers with for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(TransportResponse),
    NetworkFailure(String),
}

/// A transport that replays queued replies in order and records every request.
///
/// Cloned handles share the same queue and call log, so a test can keep one
/// handle for assertions after moving another into the client.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,

    /// Call tracking for assertions
    calls: Arc<Mutex<Vec<TransportRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Response(TransportResponse {
                status,
                body: body.into(),
            }));
        self
    }

    /// Queue a failure where no response arrives.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::NetworkFailure(message.into()));
        self
    }

    pub fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<TransportRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.calls.lock().unwrap().push(request.clone());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Response(resp)) => Ok(resp),
            Some(MockReply::NetworkFailure(message)) => Err(ClientError::Network(message)),
            None => Err(ClientError::Network(format!(
                "no mock reply queued for {} {}",
                request.method, request.url
            ))),
        }
    }
}
