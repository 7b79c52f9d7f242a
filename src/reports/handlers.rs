use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthUser, repo::Accounts},
    error::ApiError,
    params::{self, require},
    reports::{
        dto::{MacroDay, MacroRangeRequest},
        repo::MacroReports,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/compute-macros-range", post(compute_macros_range))
}

/// POST /compute-macros-range { user_id, start_date, end_date }
///
/// Callers other than the client themself or staff get an empty list.
#[instrument(skip(state, caller, payload))]
pub async fn compute_macros_range(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    payload: Result<Json<MacroRangeRequest>, JsonRejection>,
) -> Result<Json<Vec<MacroDay>>, ApiError> {
    let req = params::body(payload)?;
    require(&[&req.user_id, &req.start_date, &req.end_date])?;

    let AuthUser(caller_id) =
        caller.ok_or_else(|| ApiError::internal("Invalid or expired token"))?;

    let user_id: Uuid = req.user_id.parse("user_id")?;
    let start = req.start_date.date("start_date")?;
    let end = req.end_date.date("end_date")?;

    let viewer = state.store.viewer(caller_id).await;
    if !viewer.may_view(Some(user_id)) {
        info!(%caller_id, %user_id, "macro range hidden from caller");
        return Ok(Json(Vec::new()));
    }

    let rows = state.store.macro_range(user_id, start, end).await?;
    info!(%caller_id, %user_id, %start, %end, rows = rows.len(), "macro range served");
    Ok(Json(rows))
}
