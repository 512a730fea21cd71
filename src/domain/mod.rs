//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`scoring`] - Pure credibility scoring pipeline
//! - [`audit_worker`] - Non-blocking audit trail recording
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Orchestration lives in [`crate::application::services`].
//!
//! # Classification Flow
//!
//! 1. HTTP handler validates the request body
//! 2. [`crate::application::services::AnalysisService`] runs [`scoring`]
//! 3. The finished result is handed to [`audit_worker::AuditRecorder`]
//! 4. [`audit_worker::run_audit_worker`] persists it via the audit repositories

pub mod audit_worker;
pub mod entities;
pub mod repositories;
pub mod scoring;
