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
    eta::{
        dto::{EtaRequest, EtaResponse},
        services,
    },
    params::{self, require},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/eta", post(eta))
}

/// POST /eta { driver_id, client_address_id }
#[instrument(skip(state, caller, payload))]
pub async fn eta(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    payload: Result<Json<EtaRequest>, JsonRejection>,
) -> Result<Json<EtaResponse>, ApiError> {
    let req = params::body(payload)?;
    require(&[&req.driver_id, &req.client_address_id])?;

    let AuthUser(caller_id) =
        caller.ok_or_else(|| ApiError::internal("Invalid or expired token"))?;

    let driver_id: Uuid = req.driver_id.parse("driver_id")?;
    let address_id: i64 = req.client_address_id.parse("client_address_id")?;

    let viewer = state.store.viewer(caller_id).await;
    let estimate = services::estimate(
        state.store.as_ref(),
        &viewer,
        driver_id,
        address_id,
        state.config.default_avg_speed_kmph,
    )
    .await?;

    info!(
        %driver_id,
        address_id,
        eta_minutes = estimate.eta_minutes,
        distance_km = estimate.distance_km,
        "eta computed"
    );
    Ok(Json(estimate))
}
