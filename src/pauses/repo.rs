use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::db::PgStore;
use crate::pauses::dto::{NewPause, Pause};

pub const SKIPPED_PAUSED: &str = "skipped_paused";

#[async_trait]
pub trait Pauses: Send + Sync {
    async fn subscription_owner(&self, subscription_id: i64) -> anyhow::Result<Option<Uuid>>;

    /// Overlap and day-limit rules are enforced by the `pauses_check` trigger;
    /// a violation comes back as an error from this call.
    async fn insert_pause(&self, pause: &NewPause) -> anyhow::Result<Pause>;

    /// Marks the subscription's deliveries in `start..=end` as skipped.
    async fn skip_deliveries(&self, subscription_id: i64, start: Date, end: Date) -> anyhow::Result<u64>;
}

#[async_trait]
impl Pauses for PgStore {
    async fn subscription_owner(&self, subscription_id: i64) -> anyhow::Result<Option<Uuid>> {
        let owner = sqlx::query_scalar::<_, Uuid>(r#"SELECT user_id FROM subscriptions WHERE id = $1"#)
            .bind(subscription_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn insert_pause(&self, pause: &NewPause) -> anyhow::Result<Pause> {
        let row = sqlx::query_as::<_, Pause>(
            r#"
            INSERT INTO pauses (subscription_id, start_date, end_date, reason, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, subscription_id, start_date, end_date, reason, created_by, created_at
            "#,
        )
        .bind(pause.subscription_id)
        .bind(pause.start_date)
        .bind(pause.end_date)
        .bind(pause.reason.as_deref())
        .bind(pause.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn skip_deliveries(&self, subscription_id: i64, start: Date, end: Date) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE deliveries
            SET status = $1
            WHERE subscription_id = $2 AND date >= $3 AND date <= $4
            "#,
        )
        .bind(SKIPPED_PAUSED)
        .bind(subscription_id)
        .bind(start)
        .bind(end)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
