//! Score computation and verdict bands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{KeywordSet, ScoringRequest};
use crate::domain::entities::TrustLabel;

const BASE_SCORE: i32 = 50;
const REPUTATION_ADJUSTMENT: i32 = 30;
const FLAG_PENALTY: i32 = 6;
const MAX_FLAG_PENALTY: i32 = 24;

/// Categorical credibility band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Likely Fake / Misleading")]
    LikelyFake,
    #[serde(rename = "Needs Verification")]
    NeedsVerification,
    #[serde(rename = "Likely Credible")]
    LikelyCredible,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [
        Verdict::LikelyFake,
        Verdict::NeedsVerification,
        Verdict::LikelyCredible,
    ];

    /// Maps a score to its band: `< 40`, `40..60`, `>= 60`.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => Verdict::LikelyFake,
            40..=59 => Verdict::NeedsVerification,
            _ => Verdict::LikelyCredible,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelyFake => "Likely Fake / Misleading",
            Verdict::NeedsVerification => "Needs Verification",
            Verdict::LikelyCredible => "Likely Credible",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown verdict '{s}'"))
    }
}

/// Outcome of one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringResult {
    pub verdict: Verdict,
    pub score: u8,
    pub source_label: TrustLabel,
    pub flags: Vec<String>,
    pub domain: Option<String>,
}

/// Combines a reputation label and a flag count into a score in `[0, 100]`.
///
/// Starts at 50, adds 30 for `Trusted`, subtracts 30 for `Untrusted`, then
/// subtracts 6 per flag with the total flag deduction capped at 24.
pub fn score_from(label: TrustLabel, flag_count: usize) -> u8 {
    let adjustment = match label {
        TrustLabel::Trusted => REPUTATION_ADJUSTMENT,
        TrustLabel::Untrusted => -REPUTATION_ADJUSTMENT,
        TrustLabel::Unknown => 0,
    };

    let flags = i32::try_from(flag_count).unwrap_or(i32::MAX);
    let penalty = flags.saturating_mul(FLAG_PENALTY).min(MAX_FLAG_PENALTY);

    (BASE_SCORE + adjustment - penalty).clamp(0, 100) as u8
}

/// Runs keyword flagging, scoring and verdict derivation for a request whose
/// domain and reputation label are already resolved.
pub fn assess(
    request: &ScoringRequest,
    label: TrustLabel,
    keywords: &KeywordSet,
    domain: Option<String>,
) -> ScoringResult {
    let flags = keywords.flags(request.as_str());
    let score = score_from(label, flags.len());

    ScoringResult {
        verdict: Verdict::from_score(score),
        score,
        source_label: label,
        flags,
        domain,
    }
}
