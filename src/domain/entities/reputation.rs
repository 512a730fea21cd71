//! Domain reputation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trust label attached to a news domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrustLabel {
    Trusted,
    Untrusted,
    #[default]
    Unknown,
}

impl TrustLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLabel::Trusted => "Trusted",
            TrustLabel::Untrusted => "Untrusted",
            TrustLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TrustLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown trust label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown trust label '{0}' (expected Trusted, Untrusted or Unknown)")]
pub struct ParseTrustLabelError(pub String);

impl FromStr for TrustLabel {
    type Err = ParseTrustLabelError;

    /// Parses a label case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trusted" => Ok(TrustLabel::Trusted),
            "untrusted" => Ok(TrustLabel::Untrusted),
            "unknown" => Ok(TrustLabel::Unknown),
            _ => Err(ParseTrustLabelError(s.to_string())),
        }
    }
}

/// A stored reputation entry. At most one exists per normalized domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReputationRecord {
    pub id: i64,
    pub domain: String,
    pub label: TrustLabel,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a reputation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReputation {
    pub domain: String,
    pub label: TrustLabel,
    pub notes: String,
}
