use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::Date;

use crate::db::PgStore;
use crate::schedule::dto::{MenuTemplate, NewDelivery, NewMenuInstance};

#[async_trait]
pub trait Schedules: Send + Sync {
    async fn menu_instance_exists(&self, date: Date) -> anyhow::Result<bool>;
    async fn find_template(&self, week_no: i16, dow: i16) -> anyhow::Result<Option<MenuTemplate>>;
    /// Returns false when another run already created the instance for that date.
    async fn insert_menu_instance(&self, instance: &NewMenuInstance) -> anyhow::Result<bool>;
    async fn active_subscription_ids(&self) -> anyhow::Result<Vec<i64>>;
    /// Subscriptions with a pause where `start_date <= date <= end_date`.
    async fn paused_subscription_ids(&self, date: Date) -> anyhow::Result<Vec<i64>>;
    async fn insert_deliveries(&self, rows: &[NewDelivery]) -> anyhow::Result<u64>;
}

#[async_trait]
impl Schedules for PgStore {
    async fn menu_instance_exists(&self, date: Date) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM menu_instances WHERE date = $1)"#,
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_template(&self, week_no: i16, dow: i16) -> anyhow::Result<Option<MenuTemplate>> {
        let row = sqlx::query_as::<_, MenuTemplate>(
            r#"
            SELECT recipe_id, meal_slot
            FROM menu_templates
            WHERE week_no = $1 AND dow = $2
            "#,
        )
        .bind(week_no)
        .bind(dow)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_menu_instance(&self, instance: &NewMenuInstance) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO menu_instances (date, week_no, recipe_id, meal_slot)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (date) DO NOTHING
            "#,
        )
        .bind(instance.date)
        .bind(instance.week_no)
        .bind(instance.recipe_id)
        .bind(&instance.meal_slot)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn active_subscription_ids(&self) -> anyhow::Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"SELECT id FROM subscriptions WHERE status = 'active' ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn paused_subscription_ids(&self, date: Date) -> anyhow::Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT DISTINCT subscription_id
            FROM pauses
            WHERE start_date <= $1 AND end_date >= $1
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn insert_deliveries(&self, rows: &[NewDelivery]) -> anyhow::Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO deliveries (subscription_id, date, status, meal_slot) ");
        qb.push_values(rows, |mut b, d| {
            b.push_bind(d.subscription_id)
                .push_bind(d.date)
                .push_bind(d.status)
                .push_bind(d.meal_slot);
        });
        let res = qb.build().execute(&self.pool).await?;
        Ok(res.rows_affected())
    }
}
