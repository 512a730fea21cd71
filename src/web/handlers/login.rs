//! Login page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the login page.
///
/// Renders `templates/login.html` with sign-in and registration forms.
/// The forms post JSON to `/auth/login` and `/auth/register` via
/// `static/login.js`; the session cookie set by those endpoints is what the
/// dashboard checks.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /dashboard/login`
pub async fn login_handler() -> impl IntoResponse {
    LoginTemplate {}
}
