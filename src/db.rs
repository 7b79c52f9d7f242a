use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    auth::repo::Accounts, eta::repo::Locations, pauses::repo::Pauses,
    reports::repo::MacroReports, schedule::repo::Schedules,
};

pub async fn connect(url: &str) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(url)
        .await
        .context("connect to database")
}

/// Everything the handlers need from persistence.
pub trait Store: Accounts + MacroReports + Locations + Pauses + Schedules {}

impl<T> Store for T where T: Accounts + MacroReports + Locations + Pauses + Schedules {}

/// Postgres-backed store. Each domain implements its trait in its own `repo`.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Store opened with elevated (service role) credentials.
///
/// Only the scheduler runs against it; caller-facing handlers use
/// `AppState::store`.
#[derive(Clone)]
pub struct ServiceStore(Arc<dyn Store>);

impl ServiceStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self(store)
    }

    pub fn store(&self) -> &dyn Store {
        self.0.as_ref()
    }
}
