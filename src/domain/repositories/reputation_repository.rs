//! Repository trait for domain reputation data.

use crate::domain::entities::{NewReputation, ReputationRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Key-value store of normalized domain → trust label.
///
/// The scoring pipeline only calls [`ReputationRepository::find_by_domain`];
/// the remaining operations back the admin CLI.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReputationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReputationRepository: Send + Sync {
    /// Exact lookup by normalized domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_domain(&self, domain: &str) -> Result<Option<ReputationRecord>, AppError>;

    /// Inserts a record, or replaces label and notes if the domain exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, record: NewReputation) -> Result<ReputationRecord, AppError>;

    /// Lists all records ordered by domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<ReputationRecord>, AppError>;

    /// Removes a record. Returns `Ok(false)` if the domain had none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, domain: &str) -> Result<bool, AppError>;
}
