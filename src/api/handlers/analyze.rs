//! Handlers for classification and recent checks.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::dto::analyze::{AnalyzeRequest, AnalyzeResponse};
use crate::api::dto::recent::RecentCheckItem;
use crate::api::middleware::session::MaybeIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Classifies a headline or URL.
///
/// # Endpoint
///
/// `POST /api/analyze`
///
/// # Request Body
///
/// ```json
/// { "input": "https://www.bbc.com/news/world-123" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "verdict": "Likely Credible",
///   "score": 80,
///   "sourceLabel": "Trusted",
///   "flags": [],
///   "domain": "bbc.com"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON or `input` is missing,
/// not a string, blank, or longer than 2048 characters.
pub async fn analyze_handler(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;
    let input = request.input.unwrap_or_default();

    let result = state
        .analysis_service
        .classify(&input, identity.as_ref())
        .await?;

    Ok(Json(result.into()))
}

/// Lists the 20 most recent checks, newest first.
///
/// # Endpoint
///
/// `GET /api/analyze/recent`
///
/// Signed-in callers see their own history; anonymous callers see the
/// global audit log.
///
/// # Response
///
/// ```json
/// [
///   {
///     "createdAt": "2025-01-01T12:00:00Z",
///     "input": "BREAKING: Miracle cure LEAKED",
///     "score": 32,
///     "source": "Unknown",
///     "flags": ["Contains keyword: \"breaking\""],
///     "verdict": "Likely Fake / Misleading"
///   }
/// ]
/// ```
pub async fn recent_handler(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
) -> Result<Json<Vec<RecentCheckItem>>, AppError> {
    let checks = state
        .history_service
        .recent_checks(identity.map(|i| i.user_id))
        .await?;

    Ok(Json(checks.into_iter().map(Into::into).collect()))
}
