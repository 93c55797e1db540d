//! Mock transport for testing.
//!
//! Scripted: queued results are returned in order, one per `send`, and
//! every sent request is recorded for assertions. No network involved.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new()
//!     .with_error(ApiError::server(401, "Unauthorized"))
//!     .with_response(json!({"data": {"ok": true}}));
//!
//! // First send returns the 401, second returns the body.
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{ApiError, ApiRequest, HttpTransport};

/// Scripted transport double.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a success body.
    pub fn with_response(self, body: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: ApiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queues a success body at runtime.
    pub fn push_response(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    /// Queues a failure at runtime.
    pub fn push_error(&self, error: ApiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Returns every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns how many requests were sent.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request);
        // Running off the end of the script is a test bug; surface it as
        // the generic failure rather than panicking inside the client.
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Unexpected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_scripted_results_in_order() {
        let transport = MockTransport::new()
            .with_response(json!({"ok": 1}))
            .with_error(ApiError::Network);

        let first = transport.send(ApiRequest::get("/a")).await;
        let second = transport.send(ApiRequest::get("/b")).await;

        assert_eq!(first.unwrap(), json!({"ok": 1}));
        assert_eq!(second.unwrap_err(), ApiError::Network);
    }

    #[tokio::test]
    async fn records_sent_requests() {
        let transport = MockTransport::new().with_response(json!({}));
        transport
            .send(ApiRequest::post("/auth/login").with_body(json!({"x": 1})))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, "/auth/login");
    }

    #[tokio::test]
    async fn empty_script_yields_unexpected() {
        let transport = MockTransport::new();
        let result = transport.send(ApiRequest::get("/a")).await;
        assert_eq!(result.unwrap_err(), ApiError::Unexpected);
    }
}
