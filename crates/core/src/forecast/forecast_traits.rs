use async_trait::async_trait;

use super::forecast_errors::ForecastError;
use super::forecast_model::{Forecast, ForecastInput};

/// A spending forecast capability.
///
/// Implementations may be slow or unreliable; callers impose their own
/// timeout and treat any error as "forecast unavailable".
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Identifier used in logs, e.g. `"SEASONAL_RUN_RATE"`.
    fn id(&self) -> &'static str;

    async fn predict(&self, input: &ForecastInput) -> Result<Forecast, ForecastError>;
}
