use crate::departments::Department;
use crate::errors::Result;
use crate::transactions::transactions_model::{
    DepartmentSpending, NewTransaction, Transaction, TransactionRecord,
};
use async_trait::async_trait;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Transactions of one department and fiscal year, ordered by timestamp.
    fn list_for_department(&self, department_id: &str, fiscal_year: i32)
        -> Result<Vec<Transaction>>;
    async fn insert(&self, record: TransactionRecord) -> Result<Transaction>;
}

/// Spending aggregator operations
#[async_trait]
pub trait SpendingServiceTrait: Send + Sync {
    /// Transactions and running total for the department's active fiscal year.
    fn get_department_spending(&self, department_id: &str) -> Result<DepartmentSpending>;
    /// Same as [`get_department_spending`](Self::get_department_spending) for an
    /// already resolved department.
    fn spending_for_department(&self, department: &Department) -> Result<DepartmentSpending>;
    async fn record_transaction(
        &self,
        department_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
}
