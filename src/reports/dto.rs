use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use crate::params::Param;

#[derive(Debug, Deserialize)]
pub struct MacroRangeRequest {
    #[serde(default)]
    pub user_id: Param,
    #[serde(default)]
    pub start_date: Param,
    #[serde(default)]
    pub end_date: Param,
}

/// One row of `v_client_macro_range`: a client's intake for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MacroDay {
    pub user_id: Uuid,
    pub date: Date,
    pub meals: i64,
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}
