use serde::Serialize;
use sqlx::FromRow;
use time::Date;

pub const DEFAULT_MEAL_SLOT: &str = "lunch";
pub const SCHEDULED: &str = "scheduled";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MenuTemplate {
    pub recipe_id: i64,
    pub meal_slot: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuInstance {
    pub date: Date,
    pub week_no: i16,
    pub recipe_id: i64,
    pub meal_slot: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub subscription_id: i64,
    pub date: Date,
    pub status: &'static str,
    pub meal_slot: &'static str,
}

impl NewDelivery {
    /// Every scheduled delivery is a lunch for now.
    pub fn scheduled(subscription_id: i64, date: Date) -> Self {
        Self {
            subscription_id,
            date,
            status: SCHEDULED,
            meal_slot: DEFAULT_MEAL_SLOT,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub message: String,
}
