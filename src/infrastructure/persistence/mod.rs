//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime and mapped through `FromRow` row structs, so the
//! crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgReputationRepository`] - Domain reputation lookups and admin writes
//! - [`PgAuditRepository`] - Audit log (`analysis_logs`)
//! - [`PgHistoryRepository`] - Per-user history (`checks`)
//! - [`PgUserRepository`] - Accounts
//! - [`PgSessionRepository`] - Login sessions

pub mod pg_audit_repository;
pub mod pg_history_repository;
pub mod pg_reputation_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_audit_repository::PgAuditRepository;
pub use pg_history_repository::PgHistoryRepository;
pub use pg_reputation_repository::PgReputationRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;

/// Converts a stored `SMALLINT` score back into the `[0, 100]` range.
pub(crate) fn score_from_db(score: i16) -> u8 {
    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_from_db_clamps() {
        assert_eq!(score_from_db(-5), 0);
        assert_eq!(score_from_db(55), 55);
        assert_eq!(score_from_db(300), 100);
    }
}
