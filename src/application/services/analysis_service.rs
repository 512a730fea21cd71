//! Credibility classification service.

use std::sync::Arc;

use crate::domain::audit_worker::AuditRecorder;
use crate::domain::entities::{Identity, NewAuditEntry, TrustLabel};
use crate::domain::repositories::ReputationRepository;
use crate::domain::scoring::{KeywordSet, ScoringRequest, ScoringResult, assess, extract_domain};
use crate::error::AppError;

/// Service that runs the scoring pipeline for one input.
///
/// Classification depends only on the input text and the reputation store.
/// The caller's identity is used solely to attach the audit entry to a
/// per-user history.
pub struct AnalysisService {
    reputation_repository: Arc<dyn ReputationRepository>,
    keywords: Arc<KeywordSet>,
    recorder: AuditRecorder,
}

impl AnalysisService {
    /// Creates a new analysis service.
    pub fn new(
        reputation_repository: Arc<dyn ReputationRepository>,
        keywords: Arc<KeywordSet>,
        recorder: AuditRecorder,
    ) -> Self {
        Self {
            reputation_repository,
            keywords,
            recorder,
        }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Classifies a headline or URL.
    ///
    /// A reputation store failure degrades to [`TrustLabel::Unknown`]; the
    /// audit entry is enqueued without waiting for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input is empty, whitespace-only
    /// or too long. No audit entry is written in that case.
    pub async fn classify(
        &self,
        raw: &str,
        identity: Option<&Identity>,
    ) -> Result<ScoringResult, AppError> {
        let request = ScoringRequest::parse(raw)?;
        let domain = extract_domain(request.as_str());

        let label = match &domain {
            Some(domain) => self.lookup_label(domain).await,
            None => TrustLabel::Unknown,
        };

        let result = assess(&request, label, &self.keywords, domain);

        metrics::counter!("classifications_total", "verdict" => result.verdict.as_str())
            .increment(1);
        tracing::debug!(
            verdict = %result.verdict,
            score = result.score,
            label = %result.source_label,
            flags = result.flags.len(),
            "Input classified"
        );

        let user_id = identity.map(|i| i.user_id);
        self.recorder.record(NewAuditEntry::from_result(
            request.into_inner(),
            &result,
            user_id,
        ));

        Ok(result)
    }

    async fn lookup_label(&self, domain: &str) -> TrustLabel {
        match self.reputation_repository.find_by_domain(domain).await {
            Ok(Some(record)) => record.label,
            Ok(None) => TrustLabel::Unknown,
            Err(e) => {
                tracing::warn!(domain, error = %e, "Reputation lookup failed, using Unknown");
                TrustLabel::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{InputKind, ReputationRecord};
    use crate::domain::repositories::MockReputationRepository;
    use crate::domain::scoring::Verdict;
    use chrono::Utc;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn record(domain: &str, label: TrustLabel) -> ReputationRecord {
        ReputationRecord {
            id: 1,
            domain: domain.to_string(),
            label,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        repo: MockReputationRepository,
        capacity: usize,
    ) -> (AnalysisService, mpsc::Receiver<NewAuditEntry>) {
        let (recorder, rx) = AuditRecorder::channel(capacity);
        let service = AnalysisService::new(
            Arc::new(repo),
            Arc::new(KeywordSet::default()),
            recorder,
        );
        (service, rx)
    }

    #[tokio::test]
    async fn test_classify_empty_input_rejected_without_audit() {
        let mut repo = MockReputationRepository::new();
        repo.expect_find_by_domain().times(0);
        let (service, mut rx) = service(repo, 10);

        let result = service.classify("   ", None).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_classify_headline_skips_lookup() {
        let mut repo = MockReputationRepository::new();
        repo.expect_find_by_domain().times(0);
        let (service, mut rx) = service(repo, 10);

        let result = service
            .classify("BREAKING: Miracle cure LEAKED to the public", None)
            .await
            .unwrap();

        assert_eq!(result.score, 32);
        assert_eq!(result.verdict, Verdict::LikelyFake);
        assert_eq!(result.source_label, TrustLabel::Unknown);

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.input, "BREAKING: Miracle cure LEAKED to the public");
        assert_eq!(entry.input_kind, InputKind::Headline);
        assert_eq!(entry.score, 32);
        assert_eq!(entry.user_id, None);
    }

    #[tokio::test]
    async fn test_classify_trusted_url() {
        let mut repo = MockReputationRepository::new();
        repo.expect_find_by_domain()
            .withf(|domain| domain == "bbc.com")
            .times(1)
            .returning(|d| Ok(Some(record(d, TrustLabel::Trusted))));
        let (service, mut rx) = service(repo, 10);

        let result = service
            .classify("https://www.bbc.com/news/world-123", None)
            .await
            .unwrap();

        assert_eq!(result.score, 80);
        assert_eq!(result.verdict, Verdict::LikelyCredible);
        assert!(result.flags.is_empty());

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.domain.as_deref(), Some("bbc.com"));
        assert_eq!(entry.input_kind, InputKind::Url);
    }

    #[tokio::test]
    async fn test_classify_untrusted_mobile_url() {
        let mut repo = MockReputationRepository::new();
        repo.expect_find_by_domain()
            .withf(|domain| domain == "badexample.com")
            .times(1)
            .returning(|d| Ok(Some(record(d, TrustLabel::Untrusted))));
        let (service, _rx) = service(repo, 10);

        let result = service
            .classify("http://m.badexample.com/sensational-article", None)
            .await
            .unwrap();

        assert_eq!(result.score, 20);
        assert_eq!(result.verdict, Verdict::LikelyFake);
        assert_eq!(result.source_label, TrustLabel::Untrusted);
    }

    #[tokio::test]
    async fn test_classify_unknown_domain() {
        let mut repo = MockReputationRepository::new();
        repo.expect_find_by_domain()
            .times(1)
            .returning(|_| Ok(None));
        let (service, _rx) = service(repo, 10);

        let result = service.classify("https://example.org/a", None).await.unwrap();

        assert_eq!(result.source_label, TrustLabel::Unknown);
        assert_eq!(result.score, 50);
        assert_eq!(result.verdict, Verdict::NeedsVerification);
    }

    #[tokio::test]
    async fn test_classify_store_failure_degrades_to_unknown() {
        let mut repo = MockReputationRepository::new();
        repo.expect_find_by_domain()
            .times(1)
            .returning(|_| Err(AppError::internal("Internal server error", json!({}))));
        let (service, mut rx) = service(repo, 10);

        let result = service
            .classify("https://www.bbc.com/news", None)
            .await
            .unwrap();

        assert_eq!(result.source_label, TrustLabel::Unknown);
        assert_eq!(result.score, 50);
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_classify_attaches_identity_to_audit() {
        let repo = MockReputationRepository::new();
        let (service, mut rx) = service(repo, 10);
        let identity = Identity {
            user_id: 42,
            token_hash: "h".to_string(),
        };

        service
            .classify("Council approves budget", Some(&identity))
            .await
            .unwrap();

        assert_eq!(rx.try_recv().unwrap().user_id, Some(42));
    }

    #[tokio::test]
    async fn test_classify_succeeds_when_audit_queue_full() {
        let repo = MockReputationRepository::new();
        let (service, _rx) = service(repo, 1);

        service.classify("first headline", None).await.unwrap();
        let second = service.classify("second headline", None).await;

        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_classify_succeeds_when_audit_worker_gone() {
        let repo = MockReputationRepository::new();
        let (service, rx) = service(repo, 10);
        drop(rx);

        let result = service.classify("some headline", None).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_classify_trims_input_before_audit() {
        let repo = MockReputationRepository::new();
        let (service, mut rx) = service(repo, 10);

        service.classify("  padded headline \n", None).await.unwrap();

        assert_eq!(rx.try_recv().unwrap().input, "padded headline");
    }
}
