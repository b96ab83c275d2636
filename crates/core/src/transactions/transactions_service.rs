use chrono::Utc;
use log::debug;
use std::sync::Arc;

use super::transactions_model::{
    DepartmentSpending, NewTransaction, Transaction, TransactionRecord,
};
use super::transactions_traits::{SpendingServiceTrait, TransactionRepositoryTrait};
use crate::departments::{Department, DepartmentRepositoryTrait};
use crate::errors::Result;
use crate::fiscal::FiscalCalendar;

/// Spending aggregator over a department's recorded transactions.
pub struct SpendingService {
    department_repository: Arc<dyn DepartmentRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    calendar: FiscalCalendar,
}

impl SpendingService {
    pub fn new(
        department_repository: Arc<dyn DepartmentRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        calendar: FiscalCalendar,
    ) -> Self {
        Self {
            department_repository,
            transaction_repository,
            calendar,
        }
    }
}

#[async_trait::async_trait]
impl SpendingServiceTrait for SpendingService {
    fn get_department_spending(&self, department_id: &str) -> Result<DepartmentSpending> {
        let department = self.department_repository.get_by_id(department_id)?;
        self.spending_for_department(&department)
    }

    fn spending_for_department(&self, department: &Department) -> Result<DepartmentSpending> {
        let transactions = self
            .transaction_repository
            .list_for_department(&department.id, department.fiscal_year)?;
        // Only the department's own active fiscal year counts.
        let transactions = transactions
            .into_iter()
            .filter(|t| t.department_id == department.id && t.fiscal_year == department.fiscal_year)
            .collect();
        Ok(DepartmentSpending::from_transactions(
            department.id.clone(),
            department.fiscal_year,
            transactions,
        ))
    }

    async fn record_transaction(
        &self,
        department_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        let department = self.department_repository.get_by_id(department_id)?;
        let occurred_at = new_transaction
            .occurred_at
            .unwrap_or_else(|| Utc::now().naive_utc());
        let fiscal_year = self.calendar.fiscal_year_of_timestamp(occurred_at);
        debug!(
            "Recording {} transaction of {} for department {} (FY{})",
            new_transaction.category, new_transaction.amount, department.id, fiscal_year
        );

        self.transaction_repository
            .insert(TransactionRecord {
                department_id: department.id,
                amount: new_transaction.amount,
                category: new_transaction.category,
                description: new_transaction.description,
                occurred_at,
                fiscal_year,
            })
            .await
    }
}
