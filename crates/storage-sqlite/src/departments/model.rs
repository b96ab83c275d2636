//! Database models for departments.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{parse_decimal_tolerant, parse_seasonal_factors};
use munifin_core::departments::{BudgetAllocations, Department};

/// Database model for departments. Money columns are stored as TEXT.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::departments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDB {
    pub id: String,
    pub name: String,
    pub budget_code: String,
    pub fiscal_year: i32,
    pub budget: String,
    pub personnel_allocation: String,
    pub operations_allocation: String,
    pub capital_allocation: String,
    /// JSON array of twelve weights.
    pub seasonal_factors: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<DepartmentDB> for Department {
    fn from(db: DepartmentDB) -> Self {
        Self {
            budget: parse_decimal_tolerant(&db.budget, "budget"),
            allocations: BudgetAllocations {
                personnel: parse_decimal_tolerant(&db.personnel_allocation, "personnel_allocation"),
                operations: parse_decimal_tolerant(
                    &db.operations_allocation,
                    "operations_allocation",
                ),
                capital: parse_decimal_tolerant(&db.capital_allocation, "capital_allocation"),
            },
            seasonal_factors: parse_seasonal_factors(&db.seasonal_factors),
            id: db.id,
            name: db.name,
            budget_code: db.budget_code,
            fiscal_year: db.fiscal_year,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
