//! Utility modules supporting the client and the CLI.
//!
//! - [`HttpClient`]: shared reqwest client with the crate's user agent
//! - [`render_table`], [`render_plain`], [`render_json`]: terminal output of results
//! - [`truncate_with_ellipsis`]: unicode-aware truncation for table cells

mod display;
mod http;

pub use display::{
    render_json, render_plain, render_table, truncate_with_ellipsis, AUTHORS_WIDTH, TITLE_WIDTH,
};
pub use http::{HttpClient, DEFAULT_USER_AGENT};
