//! # KITOpen
//!
//! A client for the publication search of the KIT library (KITOpen).
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Publication, Author, SearchArgs)
//! - [`client`]: Query building and the [`SearchClient`]
//! - [`transport`]: HTTP transport trait with reqwest and mock implementations
//! - [`utils`]: HTTP client and terminal output helpers
//! - [`config`]: Configuration management

pub mod client;
pub mod config;
pub mod models;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use client::{KitOpenError, SearchClient};
pub use config::{Language, SearchConfig};
pub use models::{Author, Publication, SearchArgs};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
