//! Repository trait for the global audit log.

use crate::domain::entities::{CheckRecord, NewAuditEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only log of every classification.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAuditRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends one entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn append(&self, entry: NewAuditEntry) -> Result<(), AppError>;

    /// Newest entries first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn recent(&self, limit: i64) -> Result<Vec<CheckRecord>, AppError>;

    /// Number of entries per verdict string.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_verdict(&self) -> Result<Vec<(String, i64)>, AppError>;

    /// Returns `true` if the backing store answers a trivial query.
    async fn health_check(&self) -> bool;
}
