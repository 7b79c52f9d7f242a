use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::db::PgStore;
use crate::reports::dto::MacroDay;

#[async_trait]
pub trait MacroReports: Send + Sync {
    /// Rows for `user_id` with `start <= date <= end`, oldest first.
    async fn macro_range(&self, user_id: Uuid, start: Date, end: Date) -> anyhow::Result<Vec<MacroDay>>;
}

#[async_trait]
impl MacroReports for PgStore {
    async fn macro_range(&self, user_id: Uuid, start: Date, end: Date) -> anyhow::Result<Vec<MacroDay>> {
        let rows = sqlx::query_as::<_, MacroDay>(
            r#"
            SELECT user_id, date, meals, kcal, protein_g, carbs_g, fats_g
            FROM v_client_macro_range
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
