use serde::{Deserialize, Serialize};

/// Reading status derived from a free-text shelf label.
///
/// [`ShelfStatus::parse`] is the only place shelf labels are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShelfStatus {
    /// Finished reading.
    Read,
    /// Started and abandoned ("did not finish").
    Abandoned,
    /// On the wishlist.
    ToRead,
    /// Missing or unrecognized label.
    #[default]
    Unknown,
}

impl ShelfStatus {
    /// Normalizes a shelf label.
    ///
    /// Matching is case-insensitive. Any label containing `dnf` or
    /// `did-not-finish` is [`ShelfStatus::Abandoned`], including compound
    /// labels such as `"2023-dnf"`.
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();

        if normalized.contains("dnf") || normalized.contains("did-not-finish") {
            return ShelfStatus::Abandoned;
        }

        match normalized.as_str() {
            "read" => ShelfStatus::Read,
            "to-read" => ShelfStatus::ToRead,
            _ => ShelfStatus::Unknown,
        }
    }

    pub fn is_abandoned(&self) -> bool {
        matches!(self, ShelfStatus::Abandoned)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShelfStatus::Read => "read",
            ShelfStatus::Abandoned => "abandoned",
            ShelfStatus::ToRead => "to-read",
            ShelfStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ShelfStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ShelfStatus {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}
