//! Spending report models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::alerts::{Alert, AlertSeverity};
use crate::forecast::RiskLevel;

/// Whether the projection came from the forecast provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastStatus {
    Available,
    /// The provider failed or timed out; the projection equals current spending.
    ForecastUnavailable,
}

/// Derived spending report for one department. Recomputed on each request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingReport {
    pub department_id: String,
    pub fiscal_year: i32,
    pub as_of: NaiveDate,
    pub budget: Decimal,
    pub current_spending: Decimal,
    pub projected_spending: Decimal,
    pub transaction_count: usize,
    pub forecast_status: ForecastStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_error: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub contributing_factors: Vec<String>,
    pub alerts: Vec<Alert>,
}

impl SpendingReport {
    pub fn is_forecast_available(&self) -> bool {
        self.forecast_status == ForecastStatus::Available
    }

    pub fn count_alerts(&self, severity: AlertSeverity) -> usize {
        self.alerts.iter().filter(|a| a.severity == severity).count()
    }
}
