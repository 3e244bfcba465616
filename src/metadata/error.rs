use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
/// Errors raised while turning an index payload into [`BookMetadata`](super::BookMetadata).
pub enum MetadataError {
    /// A recognized field was present with an unusable JSON type.
    #[error("field '{field}' has invalid type: expected {expected}, got {actual}")]
    InvalidType {
        /// Field name.
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
        /// Actual JSON value (rendered).
        actual: String,
    },

    /// Rating outside `0..=5`.
    #[error("rating out of range: expected 0..={max}, got {value}")]
    RatingOutOfRange {
        /// Maximum accepted rating.
        max: u8,
        /// Offending value.
        value: i64,
    },
}
