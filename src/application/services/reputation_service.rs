//! Reputation administration service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewReputation, ReputationRecord, TrustLabel};
use crate::domain::repositories::ReputationRepository;
use crate::domain::scoring::normalize_hostname;
use crate::error::AppError;

/// Starter reputation entries written by `source seed`.
pub const DEFAULT_SOURCES: &[(&str, TrustLabel, &str)] = &[
    ("bbc.com", TrustLabel::Trusted, "Major news outlet"),
    ("theonion.com", TrustLabel::Untrusted, "Satire; not factual"),
    ("example.com", TrustLabel::Unknown, ""),
];

/// Service for maintaining the domain reputation table.
///
/// Domains are stored in the same normalized form the scoring pipeline looks
/// up, so `www.BBC.com` and `bbc.com` address one record.
pub struct ReputationService {
    repository: Arc<dyn ReputationRepository>,
}

impl ReputationService {
    pub fn new(repository: Arc<dyn ReputationRepository>) -> Self {
        Self { repository }
    }

    /// Creates or replaces the label for a domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the domain is empty or contains
    /// characters outside letters, digits, dots and hyphens.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn set_label(
        &self,
        domain: &str,
        label: TrustLabel,
        notes: &str,
    ) -> Result<ReputationRecord, AppError> {
        let domain = normalize_domain(domain)?;

        self.repository
            .upsert(NewReputation {
                domain,
                label,
                notes: notes.trim().to_string(),
            })
            .await
    }

    pub async fn list(&self) -> Result<Vec<ReputationRecord>, AppError> {
        self.repository.list().await
    }

    /// Removes a domain's record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain has no record.
    pub async fn remove(&self, domain: &str) -> Result<(), AppError> {
        let domain = normalize_domain(domain)?;

        if !self.repository.delete(&domain).await? {
            return Err(AppError::not_found(
                "Domain not found",
                json!({ "domain": domain }),
            ));
        }

        Ok(())
    }

    /// Upserts [`DEFAULT_SOURCES`], returning the stored records.
    pub async fn seed_defaults(&self) -> Result<Vec<ReputationRecord>, AppError> {
        let mut seeded = Vec::with_capacity(DEFAULT_SOURCES.len());

        for (domain, label, notes) in DEFAULT_SOURCES {
            seeded.push(self.set_label(domain, *label, notes).await?);
        }

        Ok(seeded)
    }
}

fn normalize_domain(domain: &str) -> Result<String, AppError> {
    let normalized = normalize_hostname(domain);

    let valid = !normalized.is_empty()
        && normalized.len() <= 255
        && normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if !valid {
        return Err(AppError::bad_request(
            "Invalid domain name",
            json!({ "domain": domain }),
        ));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockReputationRepository;
    use chrono::Utc;

    fn stored(record: NewReputation) -> ReputationRecord {
        ReputationRecord {
            id: 1,
            domain: record.domain,
            label: record.label,
            notes: record.notes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_set_label_normalizes_domain() {
        let mut repo = MockReputationRepository::new();
        repo.expect_upsert()
            .withf(|r| r.domain == "bbc.com" && r.label == TrustLabel::Trusted)
            .times(1)
            .returning(|r| Ok(stored(r)));

        let record = ReputationService::new(Arc::new(repo))
            .set_label("WWW.BBC.com", TrustLabel::Trusted, " Major news outlet ")
            .await
            .unwrap();

        assert_eq!(record.domain, "bbc.com");
        assert_eq!(record.notes, "Major news outlet");
    }

    #[tokio::test]
    async fn test_set_label_rejects_invalid_domain() {
        let mut repo = MockReputationRepository::new();
        repo.expect_upsert().times(0);

        let result = ReputationService::new(Arc::new(repo))
            .set_label("not a domain", TrustLabel::Trusted, "")
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_remove_missing_domain() {
        let mut repo = MockReputationRepository::new();
        repo.expect_delete()
            .withf(|d| d == "example.org")
            .times(1)
            .returning(|_| Ok(false));

        let result = ReputationService::new(Arc::new(repo))
            .remove("www.example.org")
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_seed_defaults() {
        let mut repo = MockReputationRepository::new();
        repo.expect_upsert()
            .times(DEFAULT_SOURCES.len())
            .returning(|r| Ok(stored(r)));

        let seeded = ReputationService::new(Arc::new(repo))
            .seed_defaults()
            .await
            .unwrap();

        assert_eq!(seeded.len(), 3);
        assert_eq!(seeded[0].domain, "bbc.com");
        assert_eq!(seeded[1].label, TrustLabel::Untrusted);
        assert_eq!(seeded[1].notes, "Satire; not factual");
    }
}
