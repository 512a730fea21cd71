//! Session resolution middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use std::convert::Infallible;

use crate::domain::entities::Identity;
use crate::state::AppState;
use crate::utils::cookies::{SESSION_COOKIE, read_cookie};

/// Resolves the caller's session and attaches an [`Identity`] extension.
///
/// # Token Sources
///
/// 1. `session` cookie (browser clients)
/// 2. `Authorization: Bearer <token>` header
///
/// Requests without a token, with an unknown or expired token, or whose
/// lookup fails continue anonymously. A failed lookup is logged at WARN.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/analyze", post(analyze_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), session::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if let Some(token) = session_token(&mut parts).await {
        match st.auth_service.resolve_session(&token).await {
            Ok(Some(identity)) => {
                parts.extensions.insert(identity);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed, continuing anonymously");
            }
        }
    }

    next.run(Request::from_parts(parts, body)).await
}

async fn session_token(parts: &mut Parts) -> Option<String> {
    if let Some(token) = read_cookie(&parts.headers, SESSION_COOKIE) {
        return Some(token);
    }

    AuthBearer::from_request_parts(parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token)
        .filter(|token| !token.is_empty())
}

/// Extractor for the optional caller identity set by [`layer`].
///
/// Never rejects: anonymous requests yield `MaybeIdentity(None)`.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Identity>().cloned()))
    }
}
