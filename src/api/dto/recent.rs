//! DTOs for the recent checks endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::RecentCheck;

/// One entry of `GET /api/analyze/recent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCheckItem {
    pub created_at: DateTime<Utc>,
    pub input: String,
    pub score: u8,
    pub source: String,
    pub flags: Vec<String>,
    pub verdict: String,
}

impl From<RecentCheck> for RecentCheckItem {
    fn from(check: RecentCheck) -> Self {
        Self {
            created_at: check.created_at,
            input: check.input,
            score: check.score,
            source: check.source,
            flags: check.flags,
            verdict: check.verdict,
        }
    }
}
