//! Mock Transport for Testing
//!
//! Records every outbound request and the thread it was posted from, and
//! answers with a canned body or a transport failure.

use async_trait::async_trait;
use redraft::error::{RedraftError, RedraftResult};
use redraft::executor::Transport;
use redraft::providers::ApiRequest;
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

#[derive(Debug, Clone)]
enum Behavior {
    Respond(String),
    Fail(String),
}

#[derive(Debug)]
pub struct RecordedRequest {
    pub request: ApiRequest,
    pub thread: ThreadId,
}

/// Mock transport that records requests
pub struct MockTransport {
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    behavior: Behavior,
}

impl MockTransport {
    /// Answer every request with the given body
    pub fn returning(body: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            behavior: Behavior::Respond(body.to_string()),
        })
    }

    /// Fail every request at the transport layer
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            behavior: Behavior::Fail(message.to_string()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: &ApiRequest) -> RedraftResult<String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            request: request.clone(),
            thread: std::thread::current().id(),
        });

        match &self.behavior {
            Behavior::Respond(body) => Ok(body.clone()),
            Behavior::Fail(message) => Err(RedraftError::Transport(message.clone())),
        }
    }
}
