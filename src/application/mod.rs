//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::analysis_service::AnalysisService`] - Credibility classification
//! - [`services::history_service::HistoryService`] - Recent checks
//! - [`services::auth_service::AuthService`] - Accounts and sessions
//! - [`services::profile_service::ProfileService`] - Profile reads and updates
//! - [`services::reputation_service::ReputationService`] - Reputation administration

pub mod services;
