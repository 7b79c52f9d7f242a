use crate::config::AppConfig;
use crate::db::{PgStore, ServiceStore, Store};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Store used by caller-facing handlers.
    pub store: Arc<dyn Store>,
    pub service: ServiceStore,
}

impl AppState {
    pub fn from_pools(config: AppConfig, pool: PgPool, service_pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(PgStore::new(pool)),
            service: ServiceStore::new(Arc::new(PgStore::new(service_pool))),
        }
    }

    #[cfg(test)]
    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn Store>, service: ServiceStore) -> Self {
        Self {
            config,
            store,
            service,
        }
    }
}
