//! Audit trail entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entities::TrustLabel;
use crate::domain::scoring::{ScoringResult, Verdict};

/// Placeholder shown when a stored check has no readable input.
pub const MISSING_INPUT_PLACEHOLDER: &str = "(no input)";

/// Whether the classified input was URL-shaped or a plain headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Url,
    Headline,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Url => "url",
            InputKind::Headline => "headline",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification request/response pair, ready to be appended.
///
/// Used both for the global audit log and, when `user_id` is set, for the
/// per-user history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub user_id: Option<i64>,
    pub input: String,
    pub input_kind: InputKind,
    pub domain: Option<String>,
    pub source_label: TrustLabel,
    pub verdict: Verdict,
    pub score: u8,
    pub flags: Vec<String>,
}

impl NewAuditEntry {
    /// Captures a finished classification.
    pub fn from_result(input: String, result: &ScoringResult, user_id: Option<i64>) -> Self {
        let input_kind = if result.domain.is_some() {
            InputKind::Url
        } else {
            InputKind::Headline
        };

        Self {
            user_id,
            input,
            input_kind,
            domain: result.domain.clone(),
            source_label: result.source_label,
            verdict: result.verdict,
            score: result.score,
            flags: result.flags.clone(),
        }
    }
}

/// A stored check, as read back from the audit log or the per-user history.
///
/// History rows keep the input in `headline` or `url`; older rows and audit
/// log rows only have `input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    pub created_at: DateTime<Utc>,
    pub headline: Option<String>,
    pub url: Option<String>,
    pub input: Option<String>,
    pub score: u8,
    pub source_label: String,
    pub flags: Vec<String>,
    pub verdict: String,
}

impl CheckRecord {
    /// First non-empty of headline, url and legacy input, or a placeholder.
    pub fn display_input(&self) -> String {
        [&self.headline, &self.url, &self.input]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(MISSING_INPUT_PLACEHOLDER)
            .to_string()
    }
}
