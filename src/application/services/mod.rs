//! Business logic services for the application layer.

pub mod analysis_service;
pub mod auth_service;
pub mod history_service;
pub mod profile_service;
pub mod reputation_service;

pub use analysis_service::AnalysisService;
pub use auth_service::{AuthService, LoginOutcome, run_session_purger};
pub use history_service::{HistoryService, RECENT_CHECKS_LIMIT, RecentCheck};
pub use profile_service::ProfileService;
pub use reputation_service::{DEFAULT_SOURCES, ReputationService};
