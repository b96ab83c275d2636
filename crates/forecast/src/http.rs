//! Remote forecast service client.
//!
//! Posts the [`ForecastInput`] as JSON to `{base_url}/predict` and expects a
//! [`Forecast`] JSON document back.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use munifin_core::forecast::{Forecast, ForecastError, ForecastInput, ForecastProvider};

pub const PROVIDER_ID: &str = "HTTP_FORECAST";

pub struct HttpForecastProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpForecastProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/predict", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ForecastProvider for HttpForecastProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn predict(&self, input: &ForecastInput) -> Result<Forecast, ForecastError> {
        let url = self.endpoint();
        debug!(
            "Forecast request for department {} to {}",
            input.department_id, url
        );

        let response = self
            .client
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ForecastError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    ForecastError::Transport(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ForecastError::Timeout(self.timeout.as_millis() as u64)
            } else {
                ForecastError::Transport(format!("Failed to read response: {}", e))
            }
        })?;

        if !status.is_success() {
            warn!("Forecast service answered HTTP {} for {}", status, input.department_id);
            return Err(ForecastError::Provider(format!("HTTP {} - {}", status, body)));
        }

        let forecast: Forecast = serde_json::from_str(&body)
            .map_err(|e| ForecastError::Provider(format!("Malformed forecast response: {}", e)))?;

        if forecast.end_of_year_projection.is_sign_negative()
            && !forecast.end_of_year_projection.is_zero()
        {
            return Err(ForecastError::Provider(format!(
                "Negative projection {}",
                forecast.end_of_year_projection
            )));
        }

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = HttpForecastProvider::new("http://localhost:9000", Duration::from_secs(1));
        assert_eq!(provider.id(), "HTTP_FORECAST");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = HttpForecastProvider::new("http://forecast.local/v2/", Duration::from_secs(1));
        assert_eq!(provider.endpoint(), "http://forecast.local/v2/predict");
    }
}
