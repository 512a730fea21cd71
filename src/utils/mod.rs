//! Utility functions for credentials and request handling.
//!
//! - [`passwords`] - Argon2id password hashing
//! - [`session_token`] - Random session token generation
//! - [`cookies`] - Session cookie parsing and construction

pub mod cookies;
pub mod passwords;
pub mod session_token;
