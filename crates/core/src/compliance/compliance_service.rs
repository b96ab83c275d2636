use async_trait::async_trait;
use chrono::{Months, NaiveDate};
use log::debug;
use std::sync::Arc;

use super::compliance_model::{ComplianceItem, NewComplianceItem};
use crate::constants::COMPLIANCE_WINDOW_MONTHS;
use crate::departments::DepartmentRepositoryTrait;
use crate::errors::Result;
use crate::utils::today;

/// Trait for compliance repository operations
#[async_trait]
pub trait ComplianceRepositoryTrait: Send + Sync {
    /// Items with `from <= due_date <= to`, ordered by due date ascending.
    fn list_due_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ComplianceItem>>;
    async fn create(&self, new_item: NewComplianceItem) -> Result<ComplianceItem>;
}

#[async_trait]
pub trait ComplianceServiceTrait: Send + Sync {
    /// Obligations due from today through the compliance window.
    fn get_upcoming(&self) -> Result<Vec<ComplianceItem>>;
    fn get_upcoming_from(&self, from: NaiveDate) -> Result<Vec<ComplianceItem>>;
    async fn create_item(&self, new_item: NewComplianceItem) -> Result<ComplianceItem>;
}

pub struct ComplianceService {
    repository: Arc<dyn ComplianceRepositoryTrait>,
    department_repository: Arc<dyn DepartmentRepositoryTrait>,
}

impl ComplianceService {
    pub fn new(
        repository: Arc<dyn ComplianceRepositoryTrait>,
        department_repository: Arc<dyn DepartmentRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            department_repository,
        }
    }
}

#[async_trait]
impl ComplianceServiceTrait for ComplianceService {
    fn get_upcoming(&self) -> Result<Vec<ComplianceItem>> {
        self.get_upcoming_from(today())
    }

    fn get_upcoming_from(&self, from: NaiveDate) -> Result<Vec<ComplianceItem>> {
        let to = from
            .checked_add_months(Months::new(COMPLIANCE_WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MAX);
        let mut items = self.repository.list_due_between(from, to)?;
        items.sort_by_key(|item| item.due_date);
        debug!("{} compliance items due between {} and {}", items.len(), from, to);
        Ok(items)
    }

    async fn create_item(&self, new_item: NewComplianceItem) -> Result<ComplianceItem> {
        new_item.validate()?;
        if let Some(department_id) = &new_item.department_id {
            self.department_repository.get_by_id(department_id)?;
        }
        self.repository.create(new_item).await
    }
}
