//! Recent checks service.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::CheckRecord;
use crate::domain::repositories::{AuditRepository, HistoryRepository};
use crate::error::AppError;

/// Maximum number of entries returned for recent checks.
pub const RECENT_CHECKS_LIMIT: i64 = 20;

/// One row of the recent checks listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCheck {
    pub created_at: DateTime<Utc>,
    pub input: String,
    pub score: u8,
    pub source: String,
    pub flags: Vec<String>,
    pub verdict: String,
}

impl From<CheckRecord> for RecentCheck {
    fn from(record: CheckRecord) -> Self {
        Self {
            input: record.display_input(),
            created_at: record.created_at,
            score: record.score,
            source: record.source_label,
            flags: record.flags,
            verdict: record.verdict,
        }
    }
}

/// Service for reading back recent classifications.
///
/// Authenticated callers see their own history; anonymous callers see the
/// newest entries of the global audit log.
pub struct HistoryService {
    audit_repository: Arc<dyn AuditRepository>,
    history_repository: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    /// Creates a new history service.
    pub fn new(
        audit_repository: Arc<dyn AuditRepository>,
        history_repository: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            audit_repository,
            history_repository,
        }
    }

    /// Returns up to [`RECENT_CHECKS_LIMIT`] entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn recent_checks(&self, user_id: Option<i64>) -> Result<Vec<RecentCheck>, AppError> {
        let records = match user_id {
            Some(user_id) => {
                self.history_repository
                    .recent_for_user(user_id, RECENT_CHECKS_LIMIT)
                    .await?
            }
            None => self.audit_repository.recent(RECENT_CHECKS_LIMIT).await?,
        };

        Ok(records.into_iter().map(RecentCheck::from).collect())
    }

    /// Number of audit log entries per verdict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn verdict_counts(&self) -> Result<Vec<(String, i64)>, AppError> {
        self.audit_repository.count_by_verdict().await
    }

    /// Returns `true` if the audit store answers queries.
    pub async fn store_healthy(&self) -> bool {
        self.audit_repository.health_check().await
    }
}
