//! Repository trait for per-user check history.

use crate::domain::entities::{CheckRecord, NewAuditEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Per-user mirror of audit entries, read back for "recent checks".
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgHistoryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Appends an entry to `user_id`'s history.
    ///
    /// URL inputs are stored in the `url` column, headlines in `headline`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn append(&self, user_id: i64, entry: NewAuditEntry) -> Result<(), AppError>;

    /// Newest entries of one user first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn recent_for_user(&self, user_id: i64, limit: i64)
    -> Result<Vec<CheckRecord>, AppError>;
}
