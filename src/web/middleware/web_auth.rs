//! Session guard for the web dashboard.

use axum::{
    extract::Request,
    middleware::Next,
    response::{Redirect, Response},
};

use crate::domain::entities::Identity;

/// Redirects anonymous browser requests to the login page.
///
/// Relies on [`crate::api::middleware::session::layer`] having resolved the
/// `session` cookie. Unlike the API guard, which returns `401 Unauthorized`,
/// this one redirects to `/dashboard/login`.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/", get(dashboard_handler))
///     .route_layer(middleware::from_fn(web_auth::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Result<Response, Redirect> {
    if req.extensions().get::<Identity>().is_none() {
        return Err(Redirect::to("/dashboard/login"));
    }

    Ok(next.run(req).await)
}
