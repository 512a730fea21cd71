//! HTTP middleware for request processing and protection.
//!
//! Provides session resolution, authentication, rate limiting, and
//! observability middleware.

pub mod auth;
pub mod rate_limit;
pub mod session;
pub mod tracing;
