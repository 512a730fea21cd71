//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Redirect to the dashboard
//! - `GET  /health`      - Health check: database, audit queue (public)
//! - `/api/*`            - Classification (identity optional)
//! - `/auth/*`           - Registration and sessions
//! - `/profile`          - Profile (session required)
//! - `/dashboard/*`      - Web UI (session cookie, redirects to login)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Session** - Resolves the caller's identity on `/api`, `/auth/me`,
//!   `/auth/logout`, `/profile` and `/dashboard`
//! - **Rate limiting** - Per-IP token bucket (stricter on credential routes)
//! - **Authentication** - 401 (API) or login redirect (web) when required
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimiting};
use crate::api::middleware::{auth, session, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::response::Redirect;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware,
/// wrapped in trailing-slash normalization.
pub fn app_router(state: AppState, rate_limiting: RateLimiting) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, rate_limiting))
}

/// Constructs the routed application without path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limiting` - how client IPs are keyed for rate limiting; see
///   [`RateLimiting::from_behind_proxy`]
pub fn build_router(state: AppState, rate_limiting: RateLimiting) -> Router {
    let credential_router = rate_limit::limit(
        api::routes::credential_routes(),
        rate_limit::AUTH,
        rate_limiting,
    );

    let session_router = api::routes::session_routes().route_layer(middleware::from_fn(auth::layer));

    let web_protected =
        web::routes::protected_routes().route_layer(middleware::from_fn(web_auth::layer));
    let web_router = Router::new()
        .merge(web_protected)
        .merge(web::routes::public_routes());

    // Identity is resolved inside the rate limiter, and only where it is read.
    let identity_router = Router::new()
        .nest("/api", api::routes::analyze_routes())
        .merge(session_router)
        .nest("/dashboard", web_router)
        .layer(middleware::from_fn_with_state(state.clone(), session::layer));

    let limited = rate_limit::limit(identity_router, rate_limit::GENERAL, rate_limiting);

    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/health", get(health_handler))
        .nest("/auth", credential_router)
        .merge(limited)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}
