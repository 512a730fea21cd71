//! Credibility scoring pipeline.
//!
//! Everything in this module is pure: no I/O, no shared state. The
//! application layer ([`crate::application::services::AnalysisService`])
//! wires these pieces to the reputation store and the audit recorder.
//!
//! # Pipeline
//!
//! 1. [`ScoringRequest::parse`] validates the raw input
//! 2. [`extract_domain`] decides between a URL-shaped input and a headline
//! 3. the caller resolves a [`TrustLabel`] for the extracted domain
//! 4. [`KeywordSet::flags`] reports sensational terms
//! 5. [`assess`] combines label and flags into a [`ScoringResult`]

pub mod domain_extractor;
pub mod keywords;
pub mod score;

pub use domain_extractor::{extract_domain, normalize_hostname};
pub use keywords::{KeywordSet, SENSATIONAL_TERMS};
pub use score::{ScoringResult, Verdict, assess, score_from};

use crate::domain::entities::TrustLabel;

/// Maximum accepted input length, in characters.
pub const MAX_INPUT_CHARS: usize = 2048;

/// Errors raised while validating scoring input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("Input is required")]
    EmptyInput,

    #[error("Input must be at most {max} characters")]
    InputTooLong { max: usize },
}

/// A validated, trimmed scoring input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRequest {
    input: String,
}

impl ScoringRequest {
    /// Trims `raw` and checks it is non-empty and within [`MAX_INPUT_CHARS`].
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::EmptyInput`] for empty or whitespace-only input
    /// and [`ScoringError::InputTooLong`] when the limit is exceeded.
    pub fn parse(raw: &str) -> Result<Self, ScoringError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ScoringError::EmptyInput);
        }

        if trimmed.chars().count() > MAX_INPUT_CHARS {
            return Err(ScoringError::InputTooLong {
                max: MAX_INPUT_CHARS,
            });
        }

        Ok(Self {
            input: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.input
    }

    pub fn into_inner(self) -> String {
        self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_input() {
        let request = ScoringRequest::parse("  hello world \n").unwrap();
        assert_eq!(request.as_str(), "hello world");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ScoringRequest::parse(""), Err(ScoringError::EmptyInput));
    }

    #[test]
    fn test_parse_rejects_whitespace_only() {
        assert_eq!(
            ScoringRequest::parse(" \t\r\n "),
            Err(ScoringError::EmptyInput)
        );
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let raw = "a".repeat(MAX_INPUT_CHARS + 1);
        assert_eq!(
            ScoringRequest::parse(&raw),
            Err(ScoringError::InputTooLong {
                max: MAX_INPUT_CHARS
            })
        );
    }

    #[test]
    fn test_parse_accepts_limit() {
        let raw = "a".repeat(MAX_INPUT_CHARS);
        assert!(ScoringRequest::parse(&raw).is_ok());
    }

    #[test]
    fn test_error_message_mentions_input() {
        assert!(
            ScoringError::EmptyInput
                .to_string()
                .to_lowercase()
                .contains("input")
        );
    }

    #[test]
    fn test_scenario_b_headline_without_reputation() {
        let request = ScoringRequest::parse("BREAKING: Miracle cure LEAKED to the public").unwrap();
        let keywords = KeywordSet::default();

        let domain = extract_domain(request.as_str());
        assert!(domain.is_none());

        let result = assess(&request, TrustLabel::Unknown, &keywords, domain);

        assert_eq!(result.source_label, TrustLabel::Unknown);
        assert_eq!(result.flags.len(), 3);
        assert!(result.flags.contains(&"Contains keyword: \"breaking\"".to_string()));
        assert!(result.flags.contains(&"Contains keyword: \"miracle\"".to_string()));
        assert!(result.flags.contains(&"Contains keyword: \"leaked\"".to_string()));
        assert_eq!(result.score, 32);
        assert_eq!(result.verdict, Verdict::LikelyFake);
    }

    #[test]
    fn test_scenario_c_trusted_source() {
        let request = ScoringRequest::parse("https://www.bbc.com/news/world-123").unwrap();
        let domain = extract_domain(request.as_str());
        assert_eq!(domain.as_deref(), Some("bbc.com"));

        let result = assess(&request, TrustLabel::Trusted, &KeywordSet::default(), domain);

        assert!(result.flags.is_empty());
        assert_eq!(result.score, 80);
        assert_eq!(result.verdict, Verdict::LikelyCredible);
        assert_eq!(result.domain.as_deref(), Some("bbc.com"));
    }

    #[test]
    fn test_scenario_d_untrusted_mobile_source() {
        let request = ScoringRequest::parse("http://m.badexample.com/sensational-article").unwrap();
        let domain = extract_domain(request.as_str());
        assert_eq!(domain.as_deref(), Some("badexample.com"));

        let result = assess(
            &request,
            TrustLabel::Untrusted,
            &KeywordSet::default(),
            domain,
        );

        assert!(result.flags.is_empty());
        assert_eq!(result.score, 20);
        assert_eq!(result.verdict, Verdict::LikelyFake);
    }
}
