use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::params::Param;

#[derive(Debug, Deserialize)]
pub struct PauseRequest {
    #[serde(default)]
    pub subscription_id: Param,
    #[serde(default)]
    pub start_date: Param,
    #[serde(default)]
    pub end_date: Param,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Pause as stored; `start_date..=end_date` is inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Pause {
    pub id: i64,
    pub subscription_id: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
    pub created_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPause {
    pub subscription_id: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
    pub created_by: Uuid,
}
