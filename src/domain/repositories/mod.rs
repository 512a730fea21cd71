//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; PostgreSQL implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ReputationRepository`] - Domain → trust label lookups
//! - [`AuditRepository`] - Global audit log of classifications
//! - [`HistoryRepository`] - Per-user check history
//! - [`UserRepository`] - Accounts
//! - [`SessionRepository`] - Login sessions
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod audit_repository;
pub mod history_repository;
pub mod reputation_repository;
pub mod session_repository;
pub mod user_repository;

pub use audit_repository::AuditRepository;
pub use history_repository::HistoryRepository;
pub use reputation_repository::ReputationRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use audit_repository::MockAuditRepository;
#[cfg(test)]
pub use history_repository::MockHistoryRepository;
#[cfg(test)]
pub use reputation_repository::MockReputationRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
