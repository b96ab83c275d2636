use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use super::monitor_model::{ForecastStatus, SpendingReport};
use super::monitor_traits::BudgetMonitorServiceTrait;
use crate::alerts::{AlertContext, AlertGenerator};
use crate::constants::DEFAULT_FORECAST_TIMEOUT_MS;
use crate::departments::{Department, DepartmentRepositoryTrait};
use crate::errors::Result;
use crate::fiscal::FiscalCalendar;
use crate::forecast::{Forecast, ForecastError, ForecastInput, ForecastProvider};
use crate::transactions::{DepartmentSpending, SpendingServiceTrait};
use crate::utils::today;

/// Orchestrates registry, aggregator, forecast and alert rules per department.
pub struct BudgetMonitorService {
    department_repository: Arc<dyn DepartmentRepositoryTrait>,
    spending_service: Arc<dyn SpendingServiceTrait>,
    forecaster: Arc<dyn ForecastProvider>,
    alert_generator: AlertGenerator,
    calendar: FiscalCalendar,
    forecast_timeout: Duration,
}

impl BudgetMonitorService {
    pub fn new(
        department_repository: Arc<dyn DepartmentRepositoryTrait>,
        spending_service: Arc<dyn SpendingServiceTrait>,
        forecaster: Arc<dyn ForecastProvider>,
        calendar: FiscalCalendar,
    ) -> Self {
        Self {
            department_repository,
            spending_service,
            forecaster,
            alert_generator: AlertGenerator::default(),
            calendar,
            forecast_timeout: Duration::from_millis(DEFAULT_FORECAST_TIMEOUT_MS),
        }
    }

    pub fn with_alert_generator(mut self, alert_generator: AlertGenerator) -> Self {
        self.alert_generator = alert_generator;
        self
    }

    pub fn with_forecast_timeout(mut self, timeout: Duration) -> Self {
        self.forecast_timeout = timeout;
        self
    }

    /// Runs the forecast provider under the configured timeout.
    async fn forecast(&self, input: &ForecastInput) -> std::result::Result<Forecast, ForecastError> {
        match tokio::time::timeout(self.forecast_timeout, self.forecaster.predict(input)).await {
            Ok(result) => result,
            Err(_) => Err(ForecastError::Timeout(
                self.forecast_timeout.as_millis() as u64,
            )),
        }
    }

    fn forecast_input(
        &self,
        department: &Department,
        spending: &DepartmentSpending,
        as_of: NaiveDate,
    ) -> ForecastInput {
        let period = self.calendar.period(department.fiscal_year);
        ForecastInput {
            department_id: department.id.clone(),
            fiscal_year: department.fiscal_year,
            historical_transactions: spending.transactions.clone(),
            current_spending_total: spending.total,
            seasonality_factors: department.seasonal_factors.clone(),
            period_start: period.start,
            period_end: period.end,
            as_of,
            budget: department.budget,
        }
    }
}

#[async_trait]
impl BudgetMonitorServiceTrait for BudgetMonitorService {
    async fn track_spending(&self, department_id: &str) -> Result<SpendingReport> {
        self.track_spending_as_of(department_id, today()).await
    }

    async fn track_spending_as_of(
        &self,
        department_id: &str,
        as_of: NaiveDate,
    ) -> Result<SpendingReport> {
        let department = self.department_repository.get_by_id(department_id)?;
        let spending = self
            .spending_service
            .spending_for_department(&department)?
            .through(as_of);
        let current_spending = spending.total;

        let input = self.forecast_input(&department, &spending, as_of);
        let (projected_spending, forecast_status, forecast_error, risk_level, factors) =
            match self.forecast(&input).await {
                Ok(forecast) => {
                    let projected = if forecast.end_of_year_projection < current_spending {
                        debug!(
                            "{} projected {} below current spending {} for {}, clamping",
                            self.forecaster.id(),
                            forecast.end_of_year_projection,
                            current_spending,
                            department.id
                        );
                        current_spending
                    } else {
                        forecast.end_of_year_projection
                    };
                    (
                        projected,
                        ForecastStatus::Available,
                        None,
                        Some(forecast.risk_level),
                        forecast.contributing_factors,
                    )
                }
                Err(err) => {
                    warn!(
                        "Forecast via {} unavailable for department {}: {}",
                        self.forecaster.id(),
                        department.id,
                        err
                    );
                    (
                        current_spending,
                        ForecastStatus::ForecastUnavailable,
                        Some(err.to_string()),
                        None,
                        Vec::new(),
                    )
                }
            };

        let elapsed_fraction = self
            .calendar
            .period(department.fiscal_year)
            .elapsed_fraction(as_of);
        let alerts = self.alert_generator.generate(&AlertContext {
            department: &department,
            current_spending,
            projected_spending,
            elapsed_fraction,
        });

        Ok(SpendingReport {
            department_id: department.id.clone(),
            fiscal_year: department.fiscal_year,
            as_of,
            budget: department.budget,
            current_spending,
            projected_spending,
            transaction_count: spending.transactions.len(),
            forecast_status,
            forecast_error,
            risk_level,
            contributing_factors: factors,
            alerts,
        })
    }
}
