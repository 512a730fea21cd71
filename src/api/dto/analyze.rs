//! DTOs for the classification endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::TrustLabel;
use crate::domain::scoring::{ScoringResult, Verdict};

/// Request body for `POST /api/analyze`.
///
/// A missing or `null` input deserializes to `None` and is rejected by the
/// scoring pipeline with the same message as an empty string.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub input: Option<String>,
}

/// Classification result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub verdict: Verdict,
    pub score: u8,
    pub source_label: TrustLabel,
    pub flags: Vec<String>,
    pub domain: Option<String>,
}

impl From<ScoringResult> for AnalyzeResponse {
    fn from(result: ScoringResult) -> Self {
        Self {
            verdict: result.verdict,
            score: result.score,
            source_label: result.source_label,
            flags: result.flags,
            domain: result.domain,
        }
    }
}
