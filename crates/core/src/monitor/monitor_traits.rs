use async_trait::async_trait;
use chrono::NaiveDate;

use super::monitor_model::SpendingReport;
use crate::errors::Result;

/// Budget monitor operations. Read-only and safe to call concurrently.
#[async_trait]
pub trait BudgetMonitorServiceTrait: Send + Sync {
    /// Builds the spending report for a department as of today.
    async fn track_spending(&self, department_id: &str) -> Result<SpendingReport>;

    /// Builds the spending report as of a fixed evaluation date.
    async fn track_spending_as_of(
        &self,
        department_id: &str,
        as_of: NaiveDate,
    ) -> Result<SpendingReport>;
}
