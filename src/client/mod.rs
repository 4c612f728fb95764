//! KITOpen search client.
//!
//! [`SearchClient`] validates [`SearchArgs`], turns them into query parameters,
//! sends a single GET request through a [`Transport`] and maps every record of
//! the JSON response into a [`Publication`], keeping the response order.
//!
//! ```rust,no_run
//! use kitopen::client::SearchClient;
//! use kitopen::models::SearchArgs;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SearchClient::new()?;
//! let args = SearchArgs::new()
//!     .institute("IPE")
//!     .publication_type("ZEITSCHRIFTENAUFSATZ");
//!
//! for publication in client.search(&args).await? {
//!     println!("{} ({})", publication.title(), publication.uri());
//! }
//! # Ok(())
//! # }
//! ```

mod query;

pub use query::{build_query, QueryParams, QueryValue, FORMAT, STYLE};

use std::sync::Arc;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::models::{MappingError, Publication, SearchArgs, PUBLICATION_BASE_URI};
use crate::transport::{ReqwestTransport, Transport, TransportError};

/// Search endpoint of the KITOpen API
pub const SEARCH_ENDPOINT: &str =
    "https://publikationen.bibliothek.kit.edu/publikationslisten/get.php";

/// Errors that can occur when searching KITOpen
#[derive(Debug, thiserror::Error)]
pub enum KitOpenError {
    /// None of author, institute or tag was given
    #[error("Invalid search arguments: {0}")]
    InvalidSearchArgs(String),

    /// The HTTP request failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be mapped into publications
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be set up
    #[error("Client error: {0}")]
    Client(String),
}

impl From<MappingError> for KitOpenError {
    fn from(err: MappingError) -> Self {
        KitOpenError::MalformedResponse(err.to_string())
    }
}

/// Client for the KITOpen publication search
///
/// The client holds only immutable configuration, so one instance can serve
/// concurrent searches.
#[derive(Debug, Clone)]
pub struct SearchClient {
    config: SearchConfig,
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl SearchClient {
    /// Create a client with the default configuration
    pub fn new() -> Result<Self, KitOpenError> {
        Self::with_config(SearchConfig::default())
    }

    /// Create a client talking to KITOpen over HTTP
    pub fn with_config(config: SearchConfig) -> Result<Self, KitOpenError> {
        let transport =
            ReqwestTransport::new().map_err(|e| KitOpenError::Client(e.to_string()))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(config: SearchConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            endpoint: SEARCH_ENDPOINT.to_string(),
            transport,
        }
    }

    /// Send searches to a different endpoint, e.g. a local test server
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check that the arguments name at least one of author, institute or tag
    pub fn validate(args: &SearchArgs) -> Result<(), KitOpenError> {
        if args.has_search_term() {
            Ok(())
        } else {
            Err(KitOpenError::InvalidSearchArgs(
                "at least one of author, institute or tag must be specified".to_string(),
            ))
        }
    }

    /// Search KITOpen and return the matching publications in response order
    ///
    /// An empty result is not an error. Nothing is sent when the arguments
    /// fail validation.
    pub async fn search(&self, args: &SearchArgs) -> Result<Vec<Publication>, KitOpenError> {
        Self::validate(args)?;

        let query = build_query(args, &self.config);
        tracing::debug!(
            "Querying {} with {}",
            self.endpoint,
            query
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&")
        );

        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let body = self.transport.get(&self.endpoint, &query, timeout).await?;

        let publications = parse_response(&body)?;
        tracing::info!("KITOpen returned {} publications", publications.len());
        Ok(publications)
    }

    /// Returns the URL of the detail page of a publication
    pub fn publication_url(id: &str) -> String {
        format!("{}{}", PUBLICATION_BASE_URI, id)
    }
}

/// Parse a response body into publications.
///
/// The body must be a JSON array; a single unmappable record fails the whole
/// response.
pub fn parse_response(body: &[u8]) -> Result<Vec<Publication>, KitOpenError> {
    let json: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| KitOpenError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let records = json.as_array().ok_or_else(|| {
        KitOpenError::MalformedResponse("expected a JSON array of records".to_string())
    })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Publication::from_record(record).map_err(|e| {
                KitOpenError::MalformedResponse(format!("record {}: {}", index, e))
            })
        })
        .collect()
}
