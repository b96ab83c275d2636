use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use log::{debug, error, warn};
use std::sync::Arc;

use super::dashboard_model::{
    DashboardOverview, DepartmentOverview, DepartmentStatus, DepartmentStatusReport,
    SummaryMetrics,
};
use crate::departments::DepartmentRepositoryTrait;
use crate::errors::Result;
use crate::fiscal::FiscalCalendar;
use crate::monitor::BudgetMonitorServiceTrait;
use crate::utils::today;

#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Overview of every department as of today.
    async fn overview(&self) -> Result<DashboardOverview>;
    async fn overview_as_of(&self, as_of: NaiveDate) -> Result<DashboardOverview>;

    /// Status of every department budgeted for `fiscal_year`, evaluated on the
    /// last day of `quarter` (1-4).
    async fn department_status(
        &self,
        fiscal_year: i32,
        quarter: u32,
    ) -> Result<DepartmentStatusReport>;
}

/// Fans the budget monitor out over all departments.
pub struct DashboardService {
    department_repository: Arc<dyn DepartmentRepositoryTrait>,
    monitor: Arc<dyn BudgetMonitorServiceTrait>,
    calendar: FiscalCalendar,
}

impl DashboardService {
    pub fn new(
        department_repository: Arc<dyn DepartmentRepositoryTrait>,
        monitor: Arc<dyn BudgetMonitorServiceTrait>,
    ) -> Self {
        Self {
            department_repository,
            monitor,
            calendar: FiscalCalendar::default(),
        }
    }

    pub fn with_calendar(mut self, calendar: FiscalCalendar) -> Self {
        self.calendar = calendar;
        self
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn overview(&self) -> Result<DashboardOverview> {
        self.overview_as_of(today()).await
    }

    async fn overview_as_of(&self, as_of: NaiveDate) -> Result<DashboardOverview> {
        let departments = self.department_repository.list()?;
        debug!("Building overview for {} departments", departments.len());

        // Forecast calls overlap; each outcome is captured on its own. The
        // registry and transaction reads inside each report are synchronous
        // repository calls and run on the calling task.
        let reports = join_all(
            departments
                .iter()
                .map(|dept| self.monitor.track_spending_as_of(&dept.id, as_of)),
        )
        .await;

        let overview: Vec<DepartmentOverview> = departments
            .into_iter()
            .zip(reports)
            .map(|(department, result)| match result {
                Ok(report) => DepartmentOverview::succeeded(department, report),
                Err(err) => {
                    if err.is_not_found() {
                        warn!("Department {} vanished during overview: {}", department.id, err);
                    } else {
                        error!("Spending report failed for department {}: {}", department.id, err);
                    }
                    let message = err.public_message();
                    DepartmentOverview::failed(department, message)
                }
            })
            .collect();

        let summary_metrics = SummaryMetrics::from_items(&overview);
        Ok(DashboardOverview {
            timestamp: Utc::now(),
            overview,
            summary_metrics,
        })
    }

    async fn department_status(
        &self,
        fiscal_year: i32,
        quarter: u32,
    ) -> Result<DepartmentStatusReport> {
        let bounds = self.calendar.period(fiscal_year).quarter(quarter)?;
        let as_of = bounds.last_day();
        let departments: Vec<_> = self
            .department_repository
            .list()?
            .into_iter()
            .filter(|d| d.fiscal_year == fiscal_year)
            .collect();
        debug!(
            "Evaluating {} departments for FY{} Q{} as of {}",
            departments.len(),
            fiscal_year,
            quarter,
            as_of
        );

        let reports = join_all(
            departments
                .iter()
                .map(|dept| self.monitor.track_spending_as_of(&dept.id, as_of)),
        )
        .await;

        let statuses = departments
            .iter()
            .zip(reports)
            .map(|(department, result)| match result {
                Ok(report) => DepartmentStatus::from_report(department, report),
                Err(err) => {
                    error!("Status failed for department {}: {}", department.id, err);
                    DepartmentStatus::failed(department, err.public_message())
                }
            })
            .collect();

        Ok(DepartmentStatusReport {
            fiscal_year,
            quarter,
            quarter_start: bounds.start,
            quarter_end: as_of,
            departments: statuses,
        })
    }
}
