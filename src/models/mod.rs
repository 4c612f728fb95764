//! Core data models for KITOpen publications and search arguments.

mod author;
mod publication;
mod record;
mod search;

pub use author::Author;
pub use publication::{Publication, PublicationBuilder, PUBLICATION_BASE_URI};
pub use record::MappingError;
pub use search::{SearchArgs, DEFAULT_LIMIT, DEFAULT_OFFSET};
