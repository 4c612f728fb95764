//! Translation of search arguments into KITOpen query parameters.
//!
//! KITOpen mishandles empty parameters, so a key is only emitted when the
//! caller set the field to something other than its default.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::models::{SearchArgs, DEFAULT_LIMIT, DEFAULT_OFFSET};

/// Response format requested from KITOpen
pub const FORMAT: &str = "csl_json";

/// Citation style requested from KITOpen
pub const STYLE: &str = "kit-3lines-title_b-authors-other";

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Text(String),
    Number(u32),
}

impl std::fmt::Display for QueryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Text(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Text(s)
    }
}

impl From<u32> for QueryValue {
    fn from(n: u32) -> Self {
        QueryValue::Number(n)
    }
}

/// Query parameters in the order they are sent
pub type QueryParams = Vec<(&'static str, QueryValue)>;

/// Build the query parameters for a search.
pub fn build_query(args: &SearchArgs, config: &SearchConfig) -> QueryParams {
    let mut query: QueryParams = vec![
        ("lang", config.lang.as_str().into()),
        ("format", FORMAT.into()),
        ("style", STYLE.into()),
        ("referencing", "all".into()),
        ("external_publications", "all".into()),
    ];

    let text_fields = [
        ("organizations", &args.institute),
        ("authors", &args.author),
        ("title_contains", &args.tag),
        ("year", &args.year),
    ];
    for (key, field) in text_fields {
        if let Some(value) = non_blank(field) {
            query.push((key, value.into()));
        }
    }

    if args.limit != DEFAULT_LIMIT {
        query.push(("limit", args.limit.into()));
    }
    if args.offset != DEFAULT_OFFSET {
        query.push(("offset", args.offset.into()));
    }

    if let Some(kind) = non_blank(&args.kind) {
        query.push(("types", kind.into()));
    }

    query
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}
