//! Search arguments for the KITOpen publication search.

use serde::{Deserialize, Serialize};

/// Default maximum number of records requested from KITOpen
pub const DEFAULT_LIMIT: u32 = 200;

/// Default offset into the result list
pub const DEFAULT_OFFSET: u32 = 0;

/// Search arguments for a single KITOpen query
///
/// The value is built once and never changed by the client. At least one of
/// `author`, `institute` or `tag` must be set for a search to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchArgs {
    /// Author names
    pub author: Option<String>,

    /// Organisational unit, e.g. `IPE`
    pub institute: Option<String>,

    /// Publication year or year range as understood by KITOpen
    pub year: Option<String>,

    /// Text the title has to contain
    pub tag: Option<String>,

    /// Publication type filter, e.g. `ZEITSCHRIFTENAUFSATZ`
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Maximum number of results
    pub limit: u32,

    /// Offset into the result list
    pub offset: u32,
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            author: None,
            institute: None,
            year: None,
            tag: None,
            kind: None,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl SearchArgs {
    /// Create empty search arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Set author filter
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set institute filter
    pub fn institute(mut self, institute: impl Into<String>) -> Self {
        self.institute = Some(institute.into());
        self
    }

    /// Set year filter
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Set title filter
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set publication type filter
    pub fn publication_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set maximum results
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set result offset
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Whether at least one discriminating field (author, institute, tag) is set
    pub fn has_search_term(&self) -> bool {
        [&self.author, &self.institute, &self.tag]
            .into_iter()
            .any(|field| is_set(field))
    }
}

/// A text field counts as set when it is present and not blank
fn is_set(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}
