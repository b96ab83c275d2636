//! Forecast providers for the budget monitor.
//!
//! - [`SeasonalRunRateModel`]: in-process projection from seasonal factors.
//! - [`HttpForecastProvider`]: delegates to a remote forecasting service.

pub mod http;
pub mod seasonal;

use std::sync::Arc;
use std::time::Duration;

use log::info;
use munifin_core::forecast::ForecastProvider;

pub use http::HttpForecastProvider;
pub use seasonal::{seasonal_share_elapsed, SeasonalRunRateModel};

/// Picks the remote provider when a service URL is configured, else the local model.
pub fn build_provider(remote_url: Option<&str>, timeout: Duration) -> Arc<dyn ForecastProvider> {
    match remote_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => {
            info!("Using remote forecast service at {}", url);
            Arc::new(HttpForecastProvider::new(url, timeout))
        }
        None => {
            info!("Using local seasonal run-rate forecast");
            Arc::new(SeasonalRunRateModel::new())
        }
    }
}
