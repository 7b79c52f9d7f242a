use clap::{Parser, Subcommand};
use sqlx::PgPool;

mod app;
mod auth;
mod calendar;
mod config;
mod db;
mod error;
mod eta;
mod params;
mod pauses;
mod reports;
mod schedule;
mod seed;
mod state;
#[cfg(test)]
mod testing;

use crate::{config::AppConfig, db::PgStore, state::AppState};

#[derive(Parser)]
#[command(name = "mealplan", version, about = "Meal subscription backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Materialize today's menu and deliveries, then exit
    ScheduleToday,
    /// Load demo accounts, recipes, menu rotation and subscriptions
    Seed {
        /// Do not wipe existing rows first
        #[arg(long)]
        keep_existing: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let pool = db::connect(&config.database_url).await?;
            let service_pool = if config.service_database_url == config.database_url {
                pool.clone()
            } else {
                db::connect(&config.service_database_url).await?
            };
            migrate(&service_pool).await;
            let state = AppState::from_pools(config, pool, service_pool);
            app::serve(app::build_app(state)).await
        }
        Command::ScheduleToday => {
            let store = PgStore::new(db::connect(&config.service_database_url).await?);
            let today = calendar::today(config.schedule_timezone)?;
            let outcome = schedule::services::schedule_day(&store, today).await?;
            tracing::info!("{}", outcome.message());
            Ok(())
        }
        Command::Seed { keep_existing } => {
            let pool = db::connect(&config.service_database_url).await?;
            migrate(&pool).await;
            let today = calendar::today(config.schedule_timezone)?.date;
            let report = seed::run(&pool, keep_existing, today).await?;
            tracing::info!(?report, "seed finished");
            Ok(())
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "mealplan=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

async fn migrate(pool: &PgPool) {
    if let Err(e) = sqlx::migrate!("./migrations").run(pool).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }
}
