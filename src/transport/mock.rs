//! Mock transport for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use super::{Transport, TransportError};
use crate::client::QueryParams;

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: QueryParams,
    pub timeout: Duration,
}

impl RecordedRequest {
    /// Look up a query parameter by key, rendered as text
    pub fn param(&self, key: &str) -> Option<String> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value.to_string())
    }
}

/// A mock transport that returns a predefined response and records requests.
#[derive(Debug, Default)]
pub struct MockTransport {
    response: Mutex<Option<Result<Vec<u8>, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a new mock transport answering with an empty JSON array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock transport answering with the given body.
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        let mock = Self::new();
        mock.set_body(body);
        mock
    }

    /// Set the body to return.
    pub fn set_body(&self, body: impl Into<Vec<u8>>) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(Ok(body.into()));
    }

    /// Make every following request fail with the given error.
    pub fn set_error(&self, error: TransportError) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(Err(error));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        url: &str,
        query: &QueryParams,
        timeout: Duration,
    ) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            query: query.clone(),
            timeout,
        });

        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(response) => response.clone(),
            None => Ok(b"[]".to_vec()),
        }
    }
}
