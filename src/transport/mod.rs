//! HTTP transport used by the search client.
//!
//! The [`Transport`] trait is the single seam between the client and the
//! network: it accepts a URL, query parameters and a timeout, and returns the
//! response body. [`ReqwestTransport`] talks to the real API, [`MockTransport`]
//! serves canned bodies and records requests for tests.
//!
//! Transports do not retry, follow pagination or cache anything. Implementations
//! shared between concurrent searches must be safe for concurrent use, which
//! the `Send + Sync` bound enforces.

mod http;
pub mod mock;

pub use http::ReqwestTransport;
pub use mock::{MockTransport, RecordedRequest};

use async_trait::async_trait;
use std::time::Duration;

use crate::client::QueryParams;

/// HTTP collaborator of the search client
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send a GET request and return the body of a successful response
    async fn get(
        &self,
        url: &str,
        query: &QueryParams,
        timeout: Duration,
    ) -> Result<Vec<u8>, TransportError>;
}

/// Errors raised by a transport
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The request did not finish within the timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}
