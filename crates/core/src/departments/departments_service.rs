use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::departments_model::{BudgetUpdate, Department, NewDepartment};
use super::departments_traits::{DepartmentRepositoryTrait, DepartmentServiceTrait};
use crate::errors::Result;

/// Service for the department registry
pub struct DepartmentService {
    repository: Arc<dyn DepartmentRepositoryTrait>,
}

impl DepartmentService {
    pub fn new(repository: Arc<dyn DepartmentRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl DepartmentServiceTrait for DepartmentService {
    fn list_departments(&self) -> Result<Vec<Department>> {
        self.repository.list()
    }

    fn get_department(&self, department_id: &str) -> Result<Department> {
        self.repository.get_by_id(department_id)
    }

    async fn create_department(&self, new_department: NewDepartment) -> Result<Department> {
        new_department.validate()?;
        debug!(
            "Creating department {} for fiscal year {}",
            new_department.name, new_department.fiscal_year
        );
        self.repository.create(new_department).await
    }

    async fn update_budget(&self, department_id: &str, amount: Decimal) -> Result<Department> {
        BudgetUpdate { amount }.validate()?;
        let updated = self.repository.update_budget(department_id, amount).await?;
        info!("Budget for department {} set to {}", department_id, amount);
        Ok(updated)
    }
}
