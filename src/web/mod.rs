//! Web dashboard layer for browser-based UI.
//!
//! Provides HTML pages for signing in and reviewing recent checks.
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Web-specific middleware (login redirect)
//! - [`routes`] - Dashboard route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
