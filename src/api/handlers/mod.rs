//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analyze;
pub mod auth;
pub mod health;
pub mod profile;

pub use analyze::{analyze_handler, recent_handler};
pub use auth::{login_handler, logout_handler, me_handler, register_handler};
pub use health::health_handler;
pub use profile::{get_profile_handler, update_profile_handler};
