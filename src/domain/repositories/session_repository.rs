//! Repository trait for login sessions.

use crate::domain::entities::Session;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Session storage keyed by token hash.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError>;

    /// Finds a session that has not expired at `now`.
    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError>;

    /// Deletes a session. Deleting an unknown hash is not an error.
    async fn delete(&self, token_hash: &str) -> Result<(), AppError>;

    /// Removes sessions expired at `now`, returning how many were deleted.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}
