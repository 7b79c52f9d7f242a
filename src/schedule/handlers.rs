use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{jwt::AuthUser, repo::Accounts, repo_types::Role},
    calendar,
    error::ApiError,
    schedule::{dto::ScheduleResponse, services},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/schedule-today", post(schedule_today))
}

/// POST /schedule-today
///
/// Runs with the service store, so only admins may trigger it over HTTP.
/// Cron runs the `schedule-today` subcommand instead.
#[instrument(skip(state, caller))]
pub async fn schedule_today(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let AuthUser(caller_id) = caller.ok_or(ApiError::Unauthorized)?;
    if state.store.viewer(caller_id).await.role != Some(Role::Admin) {
        info!(%caller_id, "schedule trigger forbidden");
        return Err(ApiError::Forbidden);
    }

    let today = calendar::today(state.config.schedule_timezone)?;
    let outcome = services::schedule_day(state.service.store(), today).await?;
    Ok(Json(ScheduleResponse {
        message: outcome.message(),
    }))
}
