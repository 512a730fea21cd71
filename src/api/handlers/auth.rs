//! Handlers for account registration and sessions.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, OkResponse, RegisterRequest};
use crate::application::services::LoginOutcome;
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookies::{clear_session_cookie, session_cookie};

/// Creates an account and signs it in.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Request Body
///
/// ```json
/// { "name": "Ada Lovelace", "email": "ada@example.com", "password": "at-least-8" }
/// ```
///
/// # Response
///
/// `201 Created` with a `session` cookie and the new user.
///
/// # Errors
///
/// Returns 400 Bad Request if a field is invalid.
/// Returns 409 Conflict if the email is already in use.
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let outcome = state
        .auth_service
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, session_response(&state, outcome)))
}

/// Signs in with email and password.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Errors
///
/// Returns 401 Unauthorized with "Invalid credentials" if the email is
/// unknown or the password does not match.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let outcome = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    tracing::info!(user_id = outcome.user.id, "User signed in");

    Ok(session_response(&state, outcome))
}

/// Revokes the current session and clears the cookie.
///
/// # Endpoint
///
/// `POST /auth/logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, AppError> {
    state.auth_service.logout(&identity.token_hash).await?;

    Ok((
        [(SET_COOKIE, clear_session_cookie(state.cookie_secure))],
        Json(OkResponse { ok: true }),
    ))
}

/// Returns the signed-in user.
///
/// # Endpoint
///
/// `GET /auth/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.auth_service.current_user(&identity).await?;

    Ok(Json(user.into()))
}

fn session_response(
    state: &AppState,
    outcome: LoginOutcome,
) -> ([(HeaderName, String); 1], Json<AuthResponse>) {
    let max_age = state.auth_service.session_ttl().num_seconds();
    let cookie = session_cookie(&outcome.token, max_age, state.cookie_secure);

    (
        [(SET_COOKIE, cookie)],
        Json(AuthResponse::from(outcome.user)),
    )
}
