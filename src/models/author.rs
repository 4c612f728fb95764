//! Author model for the people listed on a KITOpen publication.

use serde::{Deserialize, Serialize};

use super::record::{CslAuthor, MappingError};

/// An author of a publication as returned by KITOpen.
///
/// Authors carry no identity beyond their name pair and cannot be changed
/// after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    first: String,
    last: String,
}

impl Author {
    /// Create an author from a first and last name
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Map one entry of a record's author array.
    ///
    /// `given` becomes the first name and `family` the last name; both default
    /// to the empty string when absent.
    pub fn from_record(record: &serde_json::Value) -> Result<Self, MappingError> {
        if !record.is_object() {
            return Err(MappingError::InvalidRecord(
                "author: expected a JSON object".to_string(),
            ));
        }
        let raw = CslAuthor::deserialize(record)
            .map_err(|e| MappingError::InvalidRecord(format!("author: {}", e)))?;
        Ok(Self::from_csl(raw))
    }

    pub(crate) fn from_csl(raw: CslAuthor) -> Self {
        Self {
            first: raw.given.unwrap_or_default(),
            last: raw.family.unwrap_or_default(),
        }
    }

    /// First (given) name
    pub fn first_name(&self) -> &str {
        &self.first
    }

    /// Last (family) name
    pub fn last_name(&self) -> &str {
        &self.last
    }

    /// Returns the indexed name format, e.g. `Doe, J.` for John Doe.
    ///
    /// Without a first name only the last name is returned.
    pub fn indexed_name(&self) -> String {
        match self.first.chars().next() {
            Some(initial) => format!("{}, {}.", self.last, initial),
            None => self.last.clone(),
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{} {}", self.first, self.last).trim())
    }
}
