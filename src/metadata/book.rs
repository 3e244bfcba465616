use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::constants::MAX_RATING;

use super::error::MetadataError;
use super::shelf::ShelfStatus;

/// Placeholder for a missing title or author.
pub const MISSING_TEXT: &str = "N/A";

/// Shelf label used when the payload carries none.
pub const DEFAULT_SHELF_LABEL: &str = "unknown";

/// Preference metadata attached to one book in the reading history.
///
/// Built once at the index boundary by [`BookMetadata::from_payload`]; the
/// ranking code trusts these fields as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookMetadata {
    /// Star rating, `0..=5`. `0` means unrated. Default: `0`.
    pub rating: u8,
    /// Parsed shelf. Default: [`ShelfStatus::Unknown`].
    #[serde(skip)]
    pub shelf: ShelfStatus,
    /// Shelf label as exported. Default: `"unknown"`.
    #[serde(rename = "shelf")]
    pub shelf_label: String,
    /// Default: `"N/A"`.
    pub title: String,
    /// Default: `"N/A"`.
    pub author: String,
    /// Page count, `0` when unknown.
    pub pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,
    /// Any other descriptive fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BookMetadata {
    fn default() -> Self {
        Self {
            rating: 0,
            shelf: ShelfStatus::Unknown,
            shelf_label: DEFAULT_SHELF_LABEL.to_string(),
            title: MISSING_TEXT.to_string(),
            author: MISSING_TEXT.to_string(),
            pages: 0,
            book_id: None,
            extra: Map::new(),
        }
    }
}

impl BookMetadata {
    const KEY_RATING: &'static str = "rating";
    const KEY_SHELF: &'static str = "shelf";
    const KEY_TITLE: &'static str = "title";
    const KEY_AUTHOR: &'static str = "author";
    const KEY_PAGES: &'static str = "pages";
    const KEY_BOOK_ID: &'static str = "book_id";

    /// Creates metadata with the given title and author, everything else defaulted.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating.min(MAX_RATING);
        self
    }

    /// Sets the raw shelf label and its parsed status.
    pub fn with_shelf(mut self, label: impl Into<String>) -> Self {
        self.shelf_label = label.into();
        self.shelf = ShelfStatus::parse(&self.shelf_label);
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_book_id(mut self, id: impl Into<String>) -> Self {
        self.book_id = Some(id.into());
        self
    }

    /// Parses a loosely typed payload map, never rejecting the record.
    ///
    /// Missing fields take their defaults. A field with an unusable value
    /// also takes its default and is logged; the book stays in the result
    /// set so retrieval positions are preserved.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let (metadata, issues) = Self::parse_payload(payload);
        for issue in &issues {
            warn!(title = %metadata.title, error = %issue, "Unusable metadata field, using default");
        }
        metadata
    }

    /// Like [`from_payload`](Self::from_payload), returning every field
    /// problem instead of logging it.
    pub fn parse_payload(payload: &Map<String, Value>) -> (Self, Vec<MetadataError>) {
        let mut issues = Vec::new();
        let mut or_default = |result: Result<Option<String>, MetadataError>, default: &str| {
            result
                .unwrap_or_else(|e| {
                    issues.push(e);
                    None
                })
                .unwrap_or_else(|| default.to_string())
        };

        let shelf_label = or_default(
            Self::parse_text(payload.get(Self::KEY_SHELF), Self::KEY_SHELF),
            DEFAULT_SHELF_LABEL,
        );
        let title = or_default(
            Self::parse_text(payload.get(Self::KEY_TITLE), Self::KEY_TITLE),
            MISSING_TEXT,
        );
        let author = or_default(
            Self::parse_text(payload.get(Self::KEY_AUTHOR), Self::KEY_AUTHOR),
            MISSING_TEXT,
        );

        let rating = Self::parse_rating(payload.get(Self::KEY_RATING)).unwrap_or_else(|e| {
            issues.push(e);
            0
        });
        let book_id = Self::parse_book_id(payload.get(Self::KEY_BOOK_ID)).unwrap_or_else(|e| {
            issues.push(e);
            None
        });
        let pages = Self::parse_pages(payload.get(Self::KEY_PAGES));

        let extra = payload
            .iter()
            .filter(|(key, _)| !Self::is_known_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let metadata = Self {
            rating,
            shelf: ShelfStatus::parse(&shelf_label),
            shelf_label,
            title,
            author,
            pages,
            book_id,
            extra,
        };

        (metadata, issues)
    }

    /// Serializes back into a flat JSON map (shelf under its original label).
    pub fn to_payload(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    pub fn is_highly_rated(&self) -> bool {
        self.rating >= crate::constants::HIGH_RATING_THRESHOLD
    }

    fn is_known_key(key: &str) -> bool {
        matches!(
            key,
            Self::KEY_RATING
                | Self::KEY_SHELF
                | Self::KEY_TITLE
                | Self::KEY_AUTHOR
                | Self::KEY_PAGES
                | Self::KEY_BOOK_ID
        )
    }

    fn parse_rating(value: Option<&Value>) -> Result<u8, MetadataError> {
        let raw = match value {
            None | Some(Value::Null) => return Ok(0),
            Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i,
                // Spreadsheet exports sometimes store whole ratings as 4.0.
                (None, Some(f)) if f.fract() == 0.0 => f as i64,
                _ => {
                    return Err(MetadataError::InvalidType {
                        field: Self::KEY_RATING,
                        expected: "integer",
                        actual: n.to_string(),
                    });
                }
            },
            Some(Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(i) => i,
                Err(_) if s.trim().is_empty() => return Ok(0),
                Err(_) => {
                    return Err(MetadataError::InvalidType {
                        field: Self::KEY_RATING,
                        expected: "integer",
                        actual: Value::String(s.clone()).to_string(),
                    });
                }
            },
            Some(other) => {
                return Err(MetadataError::InvalidType {
                    field: Self::KEY_RATING,
                    expected: "integer",
                    actual: other.to_string(),
                });
            }
        };

        if !(0..=MAX_RATING as i64).contains(&raw) {
            return Err(MetadataError::RatingOutOfRange {
                max: MAX_RATING,
                value: raw,
            });
        }

        Ok(raw as u8)
    }

    fn parse_book_id(value: Option<&Value>) -> Result<Option<String>, MetadataError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(MetadataError::InvalidType {
                field: Self::KEY_BOOK_ID,
                expected: "string",
                actual: other.to_string(),
            }),
        }
    }

    fn parse_text(
        value: Option<&Value>,
        field: &'static str,
    ) -> Result<Option<String>, MetadataError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(MetadataError::InvalidType {
                field,
                expected: "string",
                actual: other.to_string(),
            }),
        }
    }

    fn parse_pages(value: Option<&Value>) -> u32 {
        match value {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|p| u32::try_from(p).ok())
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}
