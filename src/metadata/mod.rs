//! Typed book metadata and shelf normalization.
//!
//! Index payloads are loosely typed JSON. They are parsed into
//! [`BookMetadata`] exactly once, when a search result crosses into the
//! crate; everything downstream works with the typed record.

pub mod book;
pub mod error;
pub mod shelf;


pub use book::{BookMetadata, DEFAULT_SHELF_LABEL, MISSING_TEXT};
pub use error::MetadataError;
pub use shelf::ShelfStatus;
