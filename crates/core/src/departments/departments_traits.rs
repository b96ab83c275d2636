use crate::departments::departments_model::{Department, NewDepartment};
use crate::errors::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for department repository operations
#[async_trait]
pub trait DepartmentRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Department>>;
    /// Returns `Error::NotFound` when the id is unknown.
    fn get_by_id(&self, department_id: &str) -> Result<Department>;
    async fn create(&self, new_department: NewDepartment) -> Result<Department>;
    /// Last write wins; no version check is performed.
    async fn update_budget(&self, department_id: &str, amount: Decimal) -> Result<Department>;
}

/// Trait for department service operations
#[async_trait]
pub trait DepartmentServiceTrait: Send + Sync {
    fn list_departments(&self) -> Result<Vec<Department>>;
    fn get_department(&self, department_id: &str) -> Result<Department>;
    async fn create_department(&self, new_department: NewDepartment) -> Result<Department>;
    async fn update_budget(&self, department_id: &str, amount: Decimal) -> Result<Department>;
}
