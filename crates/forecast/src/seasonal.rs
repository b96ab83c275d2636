//! Seasonal run-rate forecast.
//!
//! Extrapolates current spending by the share of the department's seasonal
//! spending plan that has elapsed. With uniform factors this reduces to a
//! straight-line run rate.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

use munifin_core::constants::FISCAL_MONTHS;
use munifin_core::fiscal::FiscalPeriod;
use munifin_core::forecast::{Forecast, ForecastError, ForecastInput, ForecastProvider, RiskLevel};
use munifin_core::transactions::{SpendingCategory, Transaction};
use munifin_core::utils::format_currency;

pub const PROVIDER_ID: &str = "SEASONAL_RUN_RATE";

/// Below this share of the seasonal plan there is too little history to extrapolate.
const MIN_SHARE_ELAPSED: f64 = 0.05;

#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalRunRateModel;

impl SeasonalRunRateModel {
    pub fn new() -> Self {
        Self
    }

    fn project(&self, input: &ForecastInput) -> Result<Forecast, ForecastError> {
        let period = FiscalPeriod {
            fiscal_year: input.fiscal_year,
            start: input.period_start,
            end: input.period_end,
        };
        let share = seasonal_share_elapsed(&input.seasonality_factors, &period, input.as_of);
        if share < MIN_SHARE_ELAPSED {
            return Err(ForecastError::InsufficientHistory(format!(
                "only {:.1}% of the FY{} seasonal plan has elapsed",
                share * 100.0,
                input.fiscal_year
            )));
        }

        let current = input.current_spending_total;
        let share_dec = Decimal::from_f64(share).ok_or_else(|| {
            ForecastError::Provider(format!("Cannot represent seasonal share {}", share))
        })?;
        let projection = (current / share_dec).round_dp(2).max(current);
        let risk_level = classify_risk(projection, input.budget);

        debug!(
            "{}: department {} share {:.3} current {} projection {} risk {}",
            PROVIDER_ID, input.department_id, share, current, projection, risk_level
        );

        Ok(Forecast {
            end_of_year_projection: projection,
            risk_level,
            contributing_factors: contributing_factors(input, share, projection),
        })
    }
}

#[async_trait]
impl ForecastProvider for SeasonalRunRateModel {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn predict(&self, input: &ForecastInput) -> Result<Forecast, ForecastError> {
        self.project(input)
    }
}

/// Share of the year's seasonal weight elapsed by the end of `as_of`, in `[0, 1]`.
///
/// Malformed factor lists fall back to uniform weights.
pub fn seasonal_share_elapsed(factors: &[f64], period: &FiscalPeriod, as_of: NaiveDate) -> f64 {
    if as_of < period.start {
        return 0.0;
    }
    if as_of >= period.end {
        return 1.0;
    }

    let uniform = [1.0; FISCAL_MONTHS];
    let weights: &[f64] = if factors.len() == FISCAL_MONTHS
        && factors.iter().all(|f| f.is_finite() && *f >= 0.0)
        && factors.iter().sum::<f64>() > 0.0
    {
        factors
    } else {
        &uniform
    };

    let Some(month) = period.fiscal_month_index(as_of) else {
        return period.elapsed_fraction(as_of);
    };
    let total: f64 = weights.iter().sum();
    let completed: f64 = weights[..month].iter().sum();
    let current = weights[month] * FiscalPeriod::month_progress(as_of);
    ((completed + current) / total).clamp(0.0, 1.0)
}

fn classify_risk(projection: Decimal, budget: Decimal) -> RiskLevel {
    if budget <= Decimal::ZERO {
        return if projection > Decimal::ZERO {
            RiskLevel::High
        } else {
            RiskLevel::Low
        };
    }
    let ratio = projection / budget;
    if ratio > Decimal::ONE {
        RiskLevel::High
    } else if ratio > Decimal::new(9, 1) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn contributing_factors(input: &ForecastInput, share: f64, projection: Decimal) -> Vec<String> {
    let mut factors = Vec::new();

    if input.budget > Decimal::ZERO {
        let spent_pct = (input.current_spending_total / input.budget) * Decimal::ONE_HUNDRED;
        factors.push(format!(
            "{}% of budget spent with {:.0}% of the seasonal plan elapsed",
            spent_pct.round_dp(0),
            share * 100.0
        ));
    }

    if let Some((category, amount)) = dominant_category(&input.historical_transactions) {
        factors.push(format!(
            "{} is the largest spending category at {}",
            category.label(),
            format_currency(amount)
        ));
    }

    if projection > input.budget {
        factors.push(format!(
            "Projected to exceed budget by {}",
            format_currency(projection - input.budget)
        ));
    }

    factors
}

fn dominant_category(transactions: &[Transaction]) -> Option<(SpendingCategory, Decimal)> {
    let mut totals: HashMap<SpendingCategory, Decimal> = HashMap::new();
    for t in transactions {
        *totals.entry(t.category).or_default() += t.amount;
    }
    // Iterate in declaration order so ties resolve the same way every time.
    SpendingCategory::ALL
        .iter()
        .filter_map(|c| totals.get(c).map(|amount| (*c, *amount)))
        .fold(None, |best: Option<(SpendingCategory, Decimal)>, (c, amount)| match best {
            Some((_, best_amount)) if best_amount >= amount => best,
            _ => Some((c, amount)),
        })
}
