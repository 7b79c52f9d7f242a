use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    params::{self, require},
    pauses::{
        dto::{NewPause, Pause, PauseRequest},
        services,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/request-pause", post(request_pause))
}

/// POST /request-pause { subscription_id, start_date, end_date, reason? }
#[instrument(skip(state, caller, payload))]
pub async fn request_pause(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    payload: Result<Json<PauseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pause>), ApiError> {
    let req = params::body(payload)?;
    require(&[&req.subscription_id, &req.start_date, &req.end_date])?;

    let AuthUser(caller_id) = caller.ok_or(ApiError::Unauthorized)?;

    let pause = NewPause {
        subscription_id: req.subscription_id.parse("subscription_id")?,
        start_date: req.start_date.date("start_date")?,
        end_date: req.end_date.date("end_date")?,
        reason: req.reason,
        created_by: caller_id,
    };

    let created = services::request_pause(state.store.as_ref(), caller_id, pause).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
