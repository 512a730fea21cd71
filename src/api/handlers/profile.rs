//! Handlers for the caller's profile.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::profile::{ProfileResponse, UpdateProfileRequest};
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /profile`
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.profile_service.get_profile(identity.user_id).await?;

    Ok(Json(user.into()))
}

/// Updates the display name.
///
/// # Endpoint
///
/// `PUT /profile`
///
/// # Request Body
///
/// ```json
/// { "name": "Grace Hopper" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with "Name required" if the name is blank.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let user = state
        .profile_service
        .update_name(identity.user_id, &request.name)
        .await?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(user.into()))
}
