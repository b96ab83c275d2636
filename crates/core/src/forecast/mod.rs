//! Forecast module - the contract for year-end spending projection.
//!
//! Concrete providers live in the `forecast` crate; the monitor only sees
//! [`ForecastProvider`].

mod forecast_errors;
mod forecast_model;
mod forecast_traits;

pub use forecast_errors::ForecastError;
pub use forecast_model::{Forecast, ForecastInput, RiskLevel};
pub use forecast_traits::ForecastProvider;
