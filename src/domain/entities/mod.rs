//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs use separate structs
//! (`NewReputation`, `NewAuditEntry`, `NewUser`).
//!
//! - [`ReputationRecord`] - trust label for a news domain
//! - [`NewAuditEntry`] / [`CheckRecord`] - audit trail written and read back
//! - [`User`] / [`Session`] / [`Identity`] - accounts and authenticated callers

pub mod audit;
pub mod reputation;
pub mod user;

pub use audit::{CheckRecord, InputKind, MISSING_INPUT_PLACEHOLDER, NewAuditEntry};
pub use reputation::{NewReputation, ParseTrustLabelError, ReputationRecord, TrustLabel};
pub use user::{Identity, NewUser, Session, User};
