//! Forecast capability input and output models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transactions::Transaction;

/// Risk classification returned by a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a forecast provider may use to project year-end spending.
///
/// Only transactions of `department_id` within `fiscal_year` are included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastInput {
    pub department_id: String,
    pub fiscal_year: i32,
    pub historical_transactions: Vec<Transaction>,
    pub current_spending_total: Decimal,
    pub seasonality_factors: Vec<f64>,
    pub period_start: NaiveDate,
    /// Exclusive end of the fiscal year.
    pub period_end: NaiveDate,
    pub as_of: NaiveDate,
    pub budget: Decimal,
}

/// Projection of year-end spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub end_of_year_projection: Decimal,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub contributing_factors: Vec<String>,
}
