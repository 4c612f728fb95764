//! Raw CSL-JSON record types returned by the KITOpen API.
//!
//! Records are decoded leniently: KITOpen passes through CSL-JSON from several
//! catalogues, so the same field may arrive as a string, a number or a list of
//! strings. `null` is treated the same as an absent field.

use serde::{Deserialize, Deserializer};

/// Errors raised while mapping a raw record into a model type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// A field without a usable default is missing from the record
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The record does not have the expected shape
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl From<serde_json::Error> for MappingError {
    fn from(err: serde_json::Error) -> Self {
        MappingError::InvalidRecord(err.to_string())
    }
}

// ===== KITOpen CSL-JSON Types =====

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CslAuthor {
    pub given: Option<String>,
    pub family: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CslRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,

    #[serde(rename = "container-title", default, deserialize_with = "lenient_text")]
    pub container_title: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub volume: Option<String>,

    #[serde(rename = "DOI", default, deserialize_with = "lenient_text")]
    pub doi: Option<String>,

    #[serde(rename = "ISSN", default, deserialize_with = "lenient_text")]
    pub issn: Option<String>,

    #[serde(rename = "ISBN", default, deserialize_with = "lenient_text")]
    pub isbn: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub kind: Option<String>,

    #[serde(rename = "kit-has-full-text", default, deserialize_with = "lenient_flag")]
    pub has_full_text: Option<bool>,

    #[serde(rename = "kit-publication-id", default, deserialize_with = "lenient_text")]
    pub publication_id: Option<String>,

    #[serde(default)]
    pub authors: Option<Vec<CslAuthor>>,

    /// Standard CSL-JSON key, used when `authors` is absent
    #[serde(default)]
    pub author: Option<Vec<CslAuthor>>,
}

impl CslRecord {
    /// Author list, preferring the KITOpen `authors` key
    pub fn take_authors(&mut self) -> Vec<CslAuthor> {
        self.authors
            .take()
            .or_else(|| self.author.take())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextValue> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        TextValue::Text(s) => s,
        TextValue::Number(n) => n.to_string(),
        TextValue::List(items) => items.join(", "),
    }))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<FlagValue> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        FlagValue::Bool(b) => b,
        FlagValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        FlagValue::Text(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> CslRecord {
        CslRecord::deserialize(&value).unwrap()
    }

    #[test]
    fn test_lenient_text_variants() {
        let record = decode(json!({
            "title": "T",
            "volume": 12,
            "ISSN": ["0003-6951", "1077-3118"],
            "DOI": null
        }));
        assert_eq!(record.title.as_deref(), Some("T"));
        assert_eq!(record.volume.as_deref(), Some("12"));
        assert_eq!(record.issn.as_deref(), Some("0003-6951, 1077-3118"));
        assert_eq!(record.doi, None);
    }

    #[test]
    fn test_lenient_flag_variants() {
        assert_eq!(decode(json!({"kit-has-full-text": true})).has_full_text, Some(true));
        assert_eq!(decode(json!({"kit-has-full-text": 0})).has_full_text, Some(false));
        assert_eq!(decode(json!({"kit-has-full-text": 1})).has_full_text, Some(true));
        assert_eq!(decode(json!({"kit-has-full-text": "Yes"})).has_full_text, Some(true));
        assert_eq!(decode(json!({"kit-has-full-text": "false"})).has_full_text, Some(false));
        assert_eq!(decode(json!({})).has_full_text, None);
    }

    #[test]
    fn test_csl_author_key() {
        let mut record = decode(json!({"author": [{"given": "A", "family": "B"}]}));
        let authors = record.take_authors();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].family.as_deref(), Some("B"));
    }

    #[test]
    fn test_both_author_keys() {
        let mut record = decode(json!({
            "authors": [{"family": "Kit"}],
            "author": [{"family": "Csl"}, {"family": "Other"}]
        }));
        let authors = record.take_authors();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].family.as_deref(), Some("Kit"));
    }

    #[test]
    fn test_wrong_shape_is_error() {
        let value = json!({"title": {"nested": true}});
        assert!(CslRecord::deserialize(&value).is_err());
    }
}
