use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Elevated role used by the scheduler and the seeder only.
    pub service_database_url: String,
    pub jwt: JwtConfig,
    pub default_avg_speed_kmph: f64,
    pub schedule_timezone: Tz,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
        let service_database_url =
            std::env::var("SERVICE_DATABASE_URL").unwrap_or_else(|_| database_url.clone());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "mealplan".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let default_avg_speed_kmph = parse_speed(std::env::var("DEFAULT_AVG_SPEED_KMPH").ok())?;
        let schedule_timezone =
            parse_timezone(std::env::var("SCHEDULE_TIMEZONE").ok().as_deref())?;

        Ok(Self {
            database_url,
            service_database_url,
            jwt,
            default_avg_speed_kmph,
            schedule_timezone,
        })
    }
}

pub const DEFAULT_AVG_SPEED_KMPH: f64 = 20.0;

fn parse_speed(raw: Option<String>) -> anyhow::Result<f64> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(DEFAULT_AVG_SPEED_KMPH);
    };
    let speed: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("DEFAULT_AVG_SPEED_KMPH is not a number: {raw}"))?;
    anyhow::ensure!(
        speed.is_finite() && speed > 0.0,
        "DEFAULT_AVG_SPEED_KMPH must be positive, got {speed}"
    );
    Ok(speed)
}

fn parse_timezone(raw: Option<&str>) -> anyhow::Result<Tz> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(chrono_tz::Asia::Kolkata),
        Some(name) => name
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid SCHEDULE_TIMEZONE {name}: {e}")),
    }
}
