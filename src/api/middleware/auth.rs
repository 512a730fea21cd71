//! Authentication guard for session-only routes.

use axum::{extract::Request, middleware::Next, response::Response};
use serde_json::json;

use crate::domain::entities::Identity;
use crate::error::AppError;

/// Rejects requests that carry no resolved [`Identity`].
///
/// Must run after [`crate::api::middleware::session::layer`], which resolves
/// the `session` cookie or Bearer token.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the caller is anonymous.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/profile", get(get_profile_handler))
///     .route_layer(middleware::from_fn(auth::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<Identity>().is_none() {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Session cookie or Bearer token is missing or invalid" }),
        ));
    }

    Ok(next.run(req).await)
}
