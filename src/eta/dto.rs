use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::params::Param;

#[derive(Debug, Deserialize)]
pub struct EtaRequest {
    #[serde(default)]
    pub driver_id: Param,
    #[serde(default)]
    pub client_address_id: Param,
}

/// Stored coordinates; either column may be NULL.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromRow)]
pub struct StoredPoint {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Delivery address position and its owner.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct ClientAddress {
    pub user_id: Option<Uuid>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl ClientAddress {
    pub fn point(&self) -> StoredPoint {
        StoredPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EtaStatus {
    #[serde(rename = "Arriving soon")]
    ArrivingSoon,
    #[serde(rename = "Arriving")]
    Arriving,
    #[serde(rename = "Out for delivery")]
    OutForDelivery,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtaResponse {
    pub eta_minutes: i64,
    pub status: EtaStatus,
    pub distance_km: f64,
}
