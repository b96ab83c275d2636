//! Database models for spending transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::parse_decimal_tolerant;
use munifin_core::transactions::{SpendingCategory, Transaction, TransactionRecord};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionDB {
    pub id: String,
    pub department_id: String,
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    pub occurred_at: NaiveDateTime,
    pub fiscal_year: i32,
    pub created_at: NaiveDateTime,
}

impl TransactionDB {
    pub fn from_record(id: String, record: TransactionRecord, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            department_id: record.department_id,
            amount: record.amount.to_string(),
            category: record.category.as_str().to_string(),
            description: record.description,
            occurred_at: record.occurred_at,
            fiscal_year: record.fiscal_year,
            created_at,
        }
    }
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let category = db.category.parse().unwrap_or_else(|e| {
            log::warn!(
                "Transaction {} has unknown category '{}': {}",
                db.id,
                db.category,
                e
            );
            SpendingCategory::Other
        });
        Self {
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            category,
            id: db.id,
            department_id: db.department_id,
            description: db.description,
            occurred_at: db.occurred_at,
            fiscal_year: db.fiscal_year,
            created_at: db.created_at,
        }
    }
}
