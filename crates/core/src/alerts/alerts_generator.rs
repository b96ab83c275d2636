use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::cmp::Reverse;

use super::alerts_model::{Alert, AlertKind, AlertSeverity};
use crate::constants::DEFAULT_PACE_THRESHOLD;
use crate::departments::Department;
use crate::errors::{Error, Result};
use crate::utils::format_currency;

/// Inputs of one alert evaluation.
#[derive(Debug, Clone, Copy)]
pub struct AlertContext<'a> {
    pub department: &'a Department,
    pub current_spending: Decimal,
    pub projected_spending: Decimal,
    /// Fraction of the fiscal year elapsed, in `[0, 1]`.
    pub elapsed_fraction: f64,
}

/// Deterministic alert rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertGenerator {
    pace_threshold: f64,
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self {
            pace_threshold: DEFAULT_PACE_THRESHOLD,
        }
    }
}

impl AlertGenerator {
    /// `pace_threshold` is the tolerated lead over linear pace, e.g. `0.10`.
    pub fn new(pace_threshold: f64) -> Result<Self> {
        if !pace_threshold.is_finite() || pace_threshold < 0.0 {
            return Err(Error::InvalidConfigValue(format!(
                "Pace threshold must be a non-negative number, got {}",
                pace_threshold
            )));
        }
        Ok(Self { pace_threshold })
    }

    pub fn pace_threshold(&self) -> f64 {
        self.pace_threshold
    }

    /// Evaluates every rule and returns alerts ordered by severity, highest first.
    pub fn generate(&self, ctx: &AlertContext<'_>) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if let Some(alert) = overspending_risk(ctx) {
            alerts.push(alert);
        }
        if let Some(alert) = self.overspending_pace(ctx) {
            alerts.push(alert);
        }

        // Stable sort keeps rule order among equal severities.
        alerts.sort_by_key(|a| Reverse(a.severity));
        alerts
    }

    fn overspending_pace(&self, ctx: &AlertContext<'_>) -> Option<Alert> {
        let fraction = ctx.elapsed_fraction.clamp(0.0, 1.0);
        if fraction <= 0.0 {
            return None;
        }
        let fraction_dec = Decimal::from_f64(fraction)?;
        let tolerance = Decimal::from_f64(1.0 + self.pace_threshold)?;
        let budget = ctx.department.budget;

        let linear_pace = budget * fraction_dec;
        if ctx.current_spending <= linear_pace * tolerance {
            return None;
        }

        let ahead = ctx.current_spending - linear_pace;
        Some(Alert {
            kind: AlertKind::OverspendingPace,
            severity: AlertSeverity::Medium,
            message: format!(
                "Department {} has spent {}, {} ahead of the linear budget pace at {:.0}% of the fiscal year",
                ctx.department.name,
                format_currency(ctx.current_spending),
                format_currency(ahead),
                fraction * 100.0
            ),
            department_id: ctx.department.id.clone(),
        })
    }
}

fn overspending_risk(ctx: &AlertContext<'_>) -> Option<Alert> {
    let budget = ctx.department.budget;
    if ctx.projected_spending <= budget {
        return None;
    }
    let overage = ctx.projected_spending - budget;
    Some(Alert {
        kind: AlertKind::OverspendingRisk,
        severity: AlertSeverity::High,
        message: format!(
            "Department {} is on pace to exceed budget by {} (projected {} against {})",
            ctx.department.name,
            format_currency(overage),
            format_currency(ctx.projected_spending),
            format_currency(budget)
        ),
        department_id: ctx.department.id.clone(),
    })
}
