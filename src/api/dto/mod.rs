//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Response field names follow the camelCase shape
//! browser clients already consume.

pub mod analyze;
pub mod auth;
pub mod health;
pub mod profile;
pub mod recent;
