//! Dashboard overview models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::alerts::{Alert, AlertKind, AlertSeverity};
use crate::departments::Department;
use crate::forecast::RiskLevel;
use crate::monitor::{ForecastStatus, SpendingReport};

/// One department's entry in the overview. Exactly one of `spending` and
/// `error` is set. `forecastError` mirrors the report's degraded forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentOverview {
    pub department: Department,
    pub spending: Option<SpendingReport>,
    pub alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DepartmentOverview {
    pub fn succeeded(department: Department, report: SpendingReport) -> Self {
        Self {
            department,
            alerts: report.alerts.clone(),
            forecast_error: report.forecast_error.clone(),
            spending: Some(report),
            error: None,
        }
    }

    pub fn failed(department: Department, error: impl Into<String>) -> Self {
        Self {
            department,
            spending: None,
            alerts: Vec::new(),
            forecast_error: None,
            error: Some(error.into()),
        }
    }
}

/// Pure aggregate over the per-department entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub department_count: usize,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub total_projected: Decimal,
    pub high_severity_alerts: usize,
    pub medium_severity_alerts: usize,
    pub departments_at_risk: usize,
    pub forecast_unavailable: usize,
    pub failed_departments: usize,
}

impl SummaryMetrics {
    pub fn from_items(items: &[DepartmentOverview]) -> Self {
        let mut metrics = SummaryMetrics {
            department_count: items.len(),
            ..Default::default()
        };

        for item in items {
            metrics.total_budget += item.department.budget;
            let Some(report) = &item.spending else {
                metrics.failed_departments += 1;
                continue;
            };
            metrics.total_spent += report.current_spending;
            metrics.total_projected += report.projected_spending;
            metrics.high_severity_alerts += report.count_alerts(AlertSeverity::High);
            metrics.medium_severity_alerts += report.count_alerts(AlertSeverity::Medium);
            if report
                .alerts
                .iter()
                .any(|a| a.kind == AlertKind::OverspendingRisk)
            {
                metrics.departments_at_risk += 1;
            }
            if !report.is_forecast_available() {
                metrics.forecast_unavailable += 1;
            }
        }

        metrics
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub timestamp: DateTime<Utc>,
    pub overview: Vec<DepartmentOverview>,
    pub summary_metrics: SummaryMetrics,
}

/// Budget status of one department at the close of a fiscal quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStatus {
    pub department_id: String,
    pub name: String,
    pub budget: Decimal,
    pub spent: Option<Decimal>,
    pub projected: Option<Decimal>,
    /// Projected spending exceeds the budget.
    pub alert: bool,
    pub risk: Option<RiskLevel>,
    pub factors: Vec<String>,
    pub forecast_status: Option<ForecastStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DepartmentStatus {
    pub fn from_report(department: &Department, report: SpendingReport) -> Self {
        Self {
            department_id: department.id.clone(),
            name: department.name.clone(),
            budget: report.budget,
            spent: Some(report.current_spending),
            projected: Some(report.projected_spending),
            alert: report.projected_spending > report.budget,
            risk: report.risk_level,
            factors: report.contributing_factors,
            forecast_status: Some(report.forecast_status),
            forecast_error: report.forecast_error,
            error: None,
        }
    }

    pub fn failed(department: &Department, error: impl Into<String>) -> Self {
        Self {
            department_id: department.id.clone(),
            name: department.name.clone(),
            budget: department.budget,
            spent: None,
            projected: None,
            alert: false,
            risk: None,
            factors: Vec::new(),
            forecast_status: None,
            forecast_error: None,
            error: Some(error.into()),
        }
    }
}

/// Department statuses for one fiscal year, evaluated at a quarter's close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStatusReport {
    pub fiscal_year: i32,
    pub quarter: u32,
    pub quarter_start: NaiveDate,
    pub quarter_end: NaiveDate,
    pub departments: Vec<DepartmentStatus>,
}
