use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::info;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::model::DepartmentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::departments;
use munifin_core::departments::{Department, DepartmentRepositoryTrait, NewDepartment};
use munifin_core::errors::{Error, Result};

pub struct DepartmentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DepartmentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DepartmentRepositoryTrait for DepartmentRepository {
    fn list(&self) -> Result<Vec<Department>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = departments::table
            .order((departments::name.asc(), departments::id.asc()))
            .select(DepartmentDB::as_select())
            .load::<DepartmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Department::from).collect())
    }

    fn get_by_id(&self, department_id: &str) -> Result<Department> {
        let mut conn = get_connection(&self.pool)?;
        departments::table
            .find(department_id)
            .select(DepartmentDB::as_select())
            .first::<DepartmentDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Department::from)
            .ok_or_else(|| Error::department_not_found(department_id))
    }

    async fn create(&self, new_department: NewDepartment) -> Result<Department> {
        let now = Utc::now().naive_utc();
        let seasonal_factors =
            serde_json::to_string(&new_department.resolved_seasonal_factors())
                .map_err(StorageError::from)?;
        let row = DepartmentDB {
            id: new_department
                .id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_department.name.trim().to_string(),
            budget_code: new_department.budget_code.trim().to_string(),
            fiscal_year: new_department.fiscal_year,
            budget: new_department.budget.to_string(),
            personnel_allocation: new_department.allocations.personnel.to_string(),
            operations_allocation: new_department.allocations.operations.to_string(),
            capital_allocation: new_department.allocations.capital.to_string(),
            seasonal_factors,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Department> {
                let inserted = diesel::insert_into(departments::table)
                    .values(&row)
                    .returning(DepartmentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                info!("Created department {} ({})", inserted.id, inserted.name);
                Ok(Department::from(inserted))
            })
            .await
    }

    async fn update_budget(&self, department_id: &str, amount: Decimal) -> Result<Department> {
        let id_owned = department_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Department> {
                let updated = diesel::update(departments::table.find(&id_owned))
                    .set((
                        departments::budget.eq(amount.to_string()),
                        departments::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(DepartmentDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                updated
                    .map(Department::from)
                    .ok_or_else(|| Error::department_not_found(&id_owned))
            })
            .await
    }
}
