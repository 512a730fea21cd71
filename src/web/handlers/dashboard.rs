//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State};

use crate::application::services::RecentCheck;
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// One table row of the recent checks list.
pub struct CheckRow {
    pub created_at: String,
    pub input: String,
    pub score: u8,
    pub source: String,
    pub verdict: String,
    pub flags: String,
}

impl From<RecentCheck> for CheckRow {
    fn from(check: RecentCheck) -> Self {
        Self {
            created_at: check.created_at.format("%Y-%m-%d %H:%M").to_string(),
            input: check.input,
            score: check.score,
            source: check.source,
            verdict: check.verdict,
            flags: check.flags.join(", "),
        }
    }
}

/// Template for the dashboard home page.
///
/// Renders `templates/dashboard.html` with the analyze form and the
/// signed-in user's recent checks.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub name: String,
    pub checks: Vec<CheckRow>,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// # Errors
///
/// Returns 401 if the account behind the session is gone, 500 on store errors.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<DashboardTemplate, AppError> {
    let user = state.auth_service.current_user(&identity).await?;
    let checks = state
        .history_service
        .recent_checks(Some(identity.user_id))
        .await?;

    Ok(DashboardTemplate {
        name: user.name,
        checks: checks.into_iter().map(CheckRow::from).collect(),
    })
}
