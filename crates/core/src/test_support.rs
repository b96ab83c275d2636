//! In-memory repositories and forecast stubs shared by the service tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::compliance::{ComplianceItem, ComplianceRepositoryTrait, NewComplianceItem};
use crate::departments::{
    uniform_seasonal_factors, BudgetAllocations, Department, DepartmentRepositoryTrait,
    NewDepartment,
};
use crate::errors::{Error, Result};
use crate::forecast::{Forecast, ForecastError, ForecastInput, ForecastProvider, RiskLevel};
use crate::transactions::{SpendingCategory, Transaction, TransactionRecord, TransactionRepositoryTrait};

pub fn timestamp(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn department(id: &str, budget: Decimal) -> Department {
    Department {
        id: id.to_string(),
        name: format!("{} department", id),
        budget_code: format!("{}-001", id.to_uppercase()),
        fiscal_year: 2025,
        budget,
        allocations: BudgetAllocations::default(),
        seasonal_factors: uniform_seasonal_factors(),
        created_at: timestamp(2024, 12, 1),
        updated_at: timestamp(2024, 12, 1),
    }
}

pub fn transaction(id: &str, department_id: &str, amount: Decimal, at: NaiveDateTime) -> Transaction {
    Transaction {
        id: id.to_string(),
        department_id: department_id.to_string(),
        amount,
        category: SpendingCategory::Operations,
        description: None,
        occurred_at: at,
        fiscal_year: 2025,
        created_at: at,
    }
}

// ============================================================================
// Repositories
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryDepartmentRepository {
    pub departments: Arc<Mutex<Vec<Department>>>,
}

impl InMemoryDepartmentRepository {
    pub fn with(departments: Vec<Department>) -> Self {
        Self {
            departments: Arc::new(Mutex::new(departments)),
        }
    }
}

#[async_trait]
impl DepartmentRepositoryTrait for InMemoryDepartmentRepository {
    fn list(&self) -> Result<Vec<Department>> {
        Ok(self.departments.lock().unwrap().clone())
    }

    fn get_by_id(&self, department_id: &str) -> Result<Department> {
        self.departments
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == department_id)
            .cloned()
            .ok_or_else(|| Error::department_not_found(department_id))
    }

    async fn create(&self, new_department: NewDepartment) -> Result<Department> {
        let now = timestamp(2025, 1, 1);
        let department = Department {
            id: new_department
                .id
                .clone()
                .unwrap_or_else(|| format!("dept-{}", self.departments.lock().unwrap().len() + 1)),
            name: new_department.name.clone(),
            budget_code: new_department.budget_code.clone(),
            fiscal_year: new_department.fiscal_year,
            budget: new_department.budget,
            allocations: new_department.allocations.clone(),
            seasonal_factors: new_department.resolved_seasonal_factors(),
            created_at: now,
            updated_at: now,
        };
        self.departments.lock().unwrap().push(department.clone());
        Ok(department)
    }

    async fn update_budget(&self, department_id: &str, amount: Decimal) -> Result<Department> {
        let mut departments = self.departments.lock().unwrap();
        let department = departments
            .iter_mut()
            .find(|d| d.id == department_id)
            .ok_or_else(|| Error::department_not_found(department_id))?;
        department.budget = amount;
        Ok(department.clone())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTransactionRepository {
    pub transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl InMemoryTransactionRepository {
    pub fn with(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
        }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryTransactionRepository {
    fn list_for_department(&self, department_id: &str, fiscal_year: i32) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.department_id == department_id && t.fiscal_year == fiscal_year)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: TransactionRecord) -> Result<Transaction> {
        let mut transactions = self.transactions.lock().unwrap();
        let transaction = Transaction {
            id: format!("txn-{}", transactions.len() + 1),
            department_id: record.department_id,
            amount: record.amount,
            category: record.category,
            description: record.description,
            occurred_at: record.occurred_at,
            fiscal_year: record.fiscal_year,
            created_at: record.occurred_at,
        };
        transactions.push(transaction.clone());
        Ok(transaction)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryComplianceRepository {
    pub items: Arc<Mutex<Vec<ComplianceItem>>>,
}

#[async_trait]
impl ComplianceRepositoryTrait for InMemoryComplianceRepository {
    fn list_due_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ComplianceItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.due_date >= from && i.due_date <= to)
            .cloned()
            .collect())
    }

    async fn create(&self, new_item: NewComplianceItem) -> Result<ComplianceItem> {
        let mut items = self.items.lock().unwrap();
        let item = ComplianceItem {
            id: format!("item-{}", items.len() + 1),
            title: new_item.title,
            due_date: new_item.due_date,
            status: new_item.status,
            item_type: new_item.item_type,
            department_id: new_item.department_id,
            created_at: timestamp(2025, 1, 1),
        };
        items.push(item.clone());
        Ok(item)
    }
}

// ============================================================================
// Forecast stubs
// ============================================================================

/// Returns the same projection for every department.
pub struct FixedForecaster {
    pub projection: Decimal,
    pub calls: Arc<Mutex<Vec<ForecastInput>>>,
}

impl FixedForecaster {
    pub fn new(projection: Decimal) -> Self {
        Self {
            projection,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ForecastProvider for FixedForecaster {
    fn id(&self) -> &'static str {
        "FIXED"
    }

    async fn predict(&self, input: &ForecastInput) -> std::result::Result<Forecast, ForecastError> {
        self.calls.lock().unwrap().push(input.clone());
        Ok(Forecast {
            end_of_year_projection: self.projection,
            risk_level: if self.projection > input.budget {
                RiskLevel::High
            } else {
                RiskLevel::Low
            },
            contributing_factors: vec!["fixed projection".to_string()],
        })
    }
}

/// Fails for the listed departments and projects current spending otherwise.
pub struct FailingForecaster {
    pub failing_departments: Vec<String>,
}

impl FailingForecaster {
    pub fn always() -> Self {
        Self {
            failing_departments: vec!["*".to_string()],
        }
    }

    pub fn for_departments(ids: &[&str]) -> Self {
        Self {
            failing_departments: ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ForecastProvider for FailingForecaster {
    fn id(&self) -> &'static str {
        "FAILING"
    }

    async fn predict(&self, input: &ForecastInput) -> std::result::Result<Forecast, ForecastError> {
        let fails = self
            .failing_departments
            .iter()
            .any(|id| id == "*" || *id == input.department_id);
        if fails {
            return Err(ForecastError::Provider("model offline".to_string()));
        }
        Ok(Forecast {
            end_of_year_projection: input.current_spending_total,
            risk_level: RiskLevel::Low,
            contributing_factors: Vec::new(),
        })
    }
}

/// Sleeps before answering, to exercise the forecast timeout.
pub struct SlowForecaster {
    pub delay: Duration,
}

#[async_trait]
impl ForecastProvider for SlowForecaster {
    fn id(&self) -> &'static str {
        "SLOW"
    }

    async fn predict(&self, input: &ForecastInput) -> std::result::Result<Forecast, ForecastError> {
        tokio::time::sleep(self.delay).await;
        Ok(Forecast {
            end_of_year_projection: input.budget * Decimal::TWO,
            risk_level: RiskLevel::High,
            contributing_factors: Vec::new(),
        })
    }
}
