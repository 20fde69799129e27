// ABOUTME: Metadata extraction from parsed pages.
// ABOUTME: Ordered fallback chains per field plus the record-building extractor.

//! Metadata extraction module.
//!
//! Submodules:
//! - `fields`: `Source` lookups and the ordered fallback chains for each field.
//! - `metadata`: builds a [`MetadataRecord`](crate::model::MetadataRecord) from raw HTML.

pub mod fields;
pub mod metadata;

pub use metadata::{extract, NO_TITLE};
