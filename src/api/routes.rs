//! API route configuration.
//!
//! Identity is resolved for every route by
//! [`crate::api::middleware::session`]; session-only routes additionally
//! pass through [`crate::api::middleware::auth`].

use crate::api::handlers::{
    analyze_handler, get_profile_handler, login_handler, logout_handler, me_handler,
    recent_handler, register_handler, update_profile_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Classification routes, nested under `/api`. Identity is optional.
///
/// # Endpoints
///
/// - `POST /analyze`        - Classify a headline or URL
/// - `GET  /analyze/recent` - Recent checks (own history when signed in)
pub fn analyze_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/analyze/recent", get(recent_handler))
}

/// Credential routes, nested under `/auth`. No session required.
///
/// # Endpoints
///
/// - `POST /register` - Create an account and sign in
/// - `POST /login`    - Sign in
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Session-only routes.
///
/// # Endpoints
///
/// - `POST /auth/logout` - Revoke the current session
/// - `GET  /auth/me`     - Current user
/// - `GET  /profile`     - Current user's profile
/// - `PUT  /profile`     - Update display name
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout_handler))
        .route("/auth/me", get(me_handler))
        .route(
            "/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
}
