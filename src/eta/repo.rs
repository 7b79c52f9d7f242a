use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::eta::dto::{ClientAddress, StoredPoint};

#[async_trait]
pub trait Locations: Send + Sync {
    /// Most recently updated position of the driver.
    async fn latest_driver_location(&self, driver_id: Uuid) -> anyhow::Result<Option<StoredPoint>>;
    async fn address_location(&self, address_id: i64) -> anyhow::Result<Option<ClientAddress>>;
}

#[async_trait]
impl Locations for PgStore {
    async fn latest_driver_location(&self, driver_id: Uuid) -> anyhow::Result<Option<StoredPoint>> {
        let row = sqlx::query_as::<_, StoredPoint>(
            r#"
            SELECT lat, lng
            FROM driver_locations
            WHERE driver_id = $1
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn address_location(&self, address_id: i64) -> anyhow::Result<Option<ClientAddress>> {
        let row = sqlx::query_as::<_, ClientAddress>(
            r#"SELECT user_id, lat, lng FROM addresses WHERE id = $1"#,
        )
        .bind(address_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
