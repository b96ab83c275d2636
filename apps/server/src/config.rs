use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use munifin_core::constants::{
    DEFAULT_CACHE_STALE_SECS, DEFAULT_CACHE_TTL_SECS, DEFAULT_FISCAL_YEAR_START_MONTH,
    DEFAULT_FORECAST_TIMEOUT_MS, DEFAULT_PACE_THRESHOLD,
};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Read ahead of `Config::from_env` so its warnings reach the chosen layer.
    pub fn from_env() -> Self {
        match std::env::var("MF_LOG_FORMAT") {
            Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Remote forecast service; the local seasonal model is used when unset.
    pub forecast_url: Option<String>,
    pub forecast_timeout: Duration,
    pub pace_threshold: f64,
    pub fiscal_year_start_month: u32,
    pub cache_stale: Duration,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/app.db".to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            forecast_url: None,
            forecast_timeout: Duration::from_millis(DEFAULT_FORECAST_TIMEOUT_MS),
            pace_threshold: DEFAULT_PACE_THRESHOLD,
            fiscal_year_start_month: DEFAULT_FISCAL_YEAR_START_MONTH,
            cache_stale: Duration::from_secs(DEFAULT_CACHE_STALE_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl Config {
    /// Reads `MF_*` variables. Malformed values fall back to defaults with a
    /// warning; only the listen address is fatal.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        let listen_raw =
            std::env::var("MF_LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_raw
            .parse()
            .with_context(|| format!("Invalid MF_LISTEN_ADDR '{}'", listen_raw))?;

        let db_path = std::env::var("MF_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = std::env::var("MF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let forecast_url = std::env::var("MF_FORECAST_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let request_timeout_ms = env_or("MF_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS);
        let forecast_timeout_ms = env_or("MF_FORECAST_TIMEOUT_MS", DEFAULT_FORECAST_TIMEOUT_MS);
        let stale_secs = env_or("MF_CACHE_STALE_SECS", DEFAULT_CACHE_STALE_SECS);
        let ttl_secs = env_or("MF_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS);

        let mut pace_threshold = env_or("MF_PACE_THRESHOLD", DEFAULT_PACE_THRESHOLD);
        if !pace_threshold.is_finite() || pace_threshold < 0.0 {
            tracing::warn!(
                "MF_PACE_THRESHOLD must be non-negative, using {}",
                DEFAULT_PACE_THRESHOLD
            );
            pace_threshold = DEFAULT_PACE_THRESHOLD;
        }

        let mut fiscal_year_start_month =
            env_or("MF_FISCAL_YEAR_START_MONTH", DEFAULT_FISCAL_YEAR_START_MONTH);
        if !(1..=12).contains(&fiscal_year_start_month) {
            tracing::warn!(
                "MF_FISCAL_YEAR_START_MONTH must be 1-12, using {}",
                DEFAULT_FISCAL_YEAR_START_MONTH
            );
            fiscal_year_start_month = DEFAULT_FISCAL_YEAR_START_MONTH;
        }

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(request_timeout_ms),
            forecast_url,
            forecast_timeout: Duration::from_millis(forecast_timeout_ms),
            pace_threshold,
            fiscal_year_start_month,
            cache_stale: Duration::from_secs(stale_secs),
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} '{}', using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
