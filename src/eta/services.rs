use anyhow::Context;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::dto::Viewer;
use crate::eta::{
    dto::{EtaResponse, EtaStatus, StoredPoint},
    repo::Locations,
};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in km between two (lat, lng) points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = 0.5 - d_lat.cos() / 2.0
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (1.0 - d_lon.cos()) / 2.0;
    // rounding can push `a` a hair outside [0, 1] for (anti)podal points
    2.0 * EARTH_RADIUS_KM * a.clamp(0.0, 1.0).sqrt().asin()
}

pub fn eta_minutes(distance_km: f64, avg_speed_kmph: f64) -> i64 {
    (distance_km / avg_speed_kmph * 60.0).round() as i64
}

pub fn classify(eta_minutes: i64) -> EtaStatus {
    if eta_minutes < 2 {
        EtaStatus::ArrivingSoon
    } else if eta_minutes > 30 {
        EtaStatus::OutForDelivery
    } else {
        EtaStatus::Arriving
    }
}

/// Zero counts as missing, same as NULL.
fn coords(p: StoredPoint) -> Option<(f64, f64)> {
    match (p.lat, p.lng) {
        (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some((lat, lng)),
        _ => None,
    }
}

/// An address the viewer may not see is reported as not found.
pub async fn estimate<S: Locations + ?Sized>(
    store: &S,
    viewer: &Viewer,
    driver_id: Uuid,
    address_id: i64,
    avg_speed_kmph: f64,
) -> anyhow::Result<EtaResponse> {
    let driver = match store.latest_driver_location(driver_id).await {
        Ok(row) => row,
        Err(e) => {
            warn!(error = %e, %driver_id, "driver location lookup failed");
            None
        }
    }
    .context("Driver location not found.")?;

    let client = match store.address_location(address_id).await {
        Ok(row) => row,
        Err(e) => {
            warn!(error = %e, address_id, "address lookup failed");
            None
        }
    }
    .filter(|addr| {
        let visible = viewer.may_view(addr.user_id);
        if !visible {
            info!(viewer = %viewer.id, address_id, "address hidden from caller");
        }
        visible
    })
    .context("Client address not found.")?;

    let ((lat1, lng1), (lat2, lng2)) = coords(driver)
        .zip(coords(client.point()))
        .context("Invalid location data for driver or client.")?;

    let distance_km = haversine_km(lat1, lng1, lat2, lng2);
    let eta = eta_minutes(distance_km, avg_speed_kmph);
    Ok(EtaResponse {
        eta_minutes: eta,
        status: classify(eta),
        distance_km,
    })
}
