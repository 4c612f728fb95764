//! reqwest-backed transport.

use async_trait::async_trait;
use std::time::Duration;

use super::{Transport, TransportError};
use crate::client::QueryParams;
use crate::utils::HttpClient;

/// Transport sending real HTTP requests through the shared [`HttpClient`]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: HttpClient,
}

impl ReqwestTransport {
    /// Create a transport with the default user agent
    pub fn new() -> Result<Self, TransportError> {
        let client = HttpClient::new()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Create a transport on top of an existing client
    pub fn from_client(client: HttpClient) -> Self {
        Self { client }
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &QueryParams,
        timeout: Duration,
    ) -> Result<Vec<u8>, TransportError> {
        let pairs: Vec<(&str, String)> = query
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect();

        let response = self
            .client
            .client()
            .get(url)
            .query(&pairs)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("KITOpen returned status {} for {}", status, response.url());
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| classify(e, timeout))?;
        Ok(body.to_vec())
    }
}
