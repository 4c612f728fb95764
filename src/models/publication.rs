//! Publication model representing one record of a KITOpen search.

use serde::{Deserialize, Serialize};

use super::record::{CslRecord, MappingError};
use super::Author;

/// Base URI of the detail pages of the KIT library
pub const PUBLICATION_BASE_URI: &str = "https://publikationen.bibliothek.kit.edu/";

/// A publication returned by the KITOpen API
///
/// All string fields default to the empty string, `available` defaults to
/// `false` and the author list to empty. The authors keep the order in which
/// the API listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    title: String,
    journal: String,
    volume: String,
    doi: String,
    issn: String,
    isbn: String,
    #[serde(rename = "type")]
    kind: String,
    id: String,
    available: bool,
    authors: Vec<Author>,
}

impl Publication {
    /// Map a single record of the API response.
    ///
    /// Fails with [`MappingError::MissingField`] when the record has no title.
    pub fn from_record(record: &serde_json::Value) -> Result<Self, MappingError> {
        if !record.is_object() {
            return Err(MappingError::InvalidRecord(
                "expected a JSON object".to_string(),
            ));
        }
        let raw = CslRecord::deserialize(record)?;
        Self::from_csl(raw)
    }

    pub(crate) fn from_csl(mut raw: CslRecord) -> Result<Self, MappingError> {
        let authors = raw.take_authors();
        let title = raw.title.ok_or(MappingError::MissingField("title"))?;

        Ok(Self {
            title,
            journal: raw.container_title.unwrap_or_default(),
            volume: raw.volume.unwrap_or_default(),
            doi: raw.doi.unwrap_or_default(),
            issn: raw.issn.unwrap_or_default(),
            isbn: raw.isbn.unwrap_or_default(),
            kind: raw.kind.unwrap_or_default(),
            id: raw.publication_id.unwrap_or_default(),
            available: raw.has_full_text.unwrap_or(false),
            authors: authors.into_iter().map(Author::from_csl).collect(),
        })
    }

    /// Publication title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Journal (CSL `container-title`) the publication appeared in
    pub fn journal(&self) -> &str {
        &self.journal
    }

    /// Journal volume
    pub fn volume(&self) -> &str {
        &self.volume
    }

    /// Digital Object Identifier
    pub fn doi(&self) -> &str {
        &self.doi
    }

    pub fn issn(&self) -> &str {
        &self.issn
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Publication type as reported by KITOpen (e.g. `article-journal`)
    pub fn publication_type(&self) -> &str {
        &self.kind
    }

    /// KIT internal publication id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the full text is available on the KITOpen site
    pub fn is_full_text_available(&self) -> bool {
        self.available
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Returns the author list in indexed form, e.g. `Doe, J.; Roe, R.`
    pub fn indexed_authors(&self) -> String {
        self.authors
            .iter()
            .map(Author::indexed_name)
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Returns the URI of the detail page of this publication
    pub fn uri(&self) -> String {
        format!("{}{}", PUBLICATION_BASE_URI, self.id)
    }
}

/// Builder for constructing Publication objects from an explicit field set
#[derive(Debug, Clone)]
pub struct PublicationBuilder {
    publication: Publication,
}

impl PublicationBuilder {
    /// Create a new builder with the title, every other field at its default
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            publication: Publication {
                title: title.into(),
                ..Default::default()
            },
        }
    }

    pub fn journal(mut self, journal: impl Into<String>) -> Self {
        self.publication.journal = journal.into();
        self
    }

    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.publication.volume = volume.into();
        self
    }

    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.publication.doi = doi.into();
        self
    }

    pub fn issn(mut self, issn: impl Into<String>) -> Self {
        self.publication.issn = issn.into();
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.publication.isbn = isbn.into();
        self
    }

    /// Set the publication type
    pub fn publication_type(mut self, kind: impl Into<String>) -> Self {
        self.publication.kind = kind.into();
        self
    }

    /// Set the KIT publication id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.publication.id = id.into();
        self
    }

    /// Set full text availability
    pub fn available(mut self, available: bool) -> Self {
        self.publication.available = available;
        self
    }

    /// Append an author
    pub fn author(mut self, author: Author) -> Self {
        self.publication.authors.push(author);
        self
    }

    /// Replace the author list
    pub fn authors(mut self, authors: Vec<Author>) -> Self {
        self.publication.authors = authors;
        self
    }

    /// Build the Publication
    pub fn build(self) -> Publication {
        self.publication
    }
}
