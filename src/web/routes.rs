//! Web dashboard route configuration.

use crate::state::AppState;
use crate::web::handlers::{dashboard_handler, login_handler};
use axum::{Router, routing::get};

/// Protected dashboard routes requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`], which redirects to the
/// login page.
///
/// # Endpoints
///
/// - `GET /` - Analyze form and recent checks
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard_handler))
}

/// Public dashboard routes without authentication.
///
/// # Endpoints
///
/// - `GET /login` - Sign-in and registration page
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_handler))
}
