//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// Spending category of a transaction, aligned with the allocation breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpendingCategory {
    Personnel,
    #[default]
    Operations,
    Capital,
    Other,
}

impl SpendingCategory {
    pub const ALL: [SpendingCategory; 4] = [
        SpendingCategory::Personnel,
        SpendingCategory::Operations,
        SpendingCategory::Capital,
        SpendingCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpendingCategory::Personnel => "PERSONNEL",
            SpendingCategory::Operations => "OPERATIONS",
            SpendingCategory::Capital => "CAPITAL",
            SpendingCategory::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpendingCategory::Personnel => "Personnel",
            SpendingCategory::Operations => "Operations",
            SpendingCategory::Capital => "Capital",
            SpendingCategory::Other => "Other",
        }
    }
}

impl fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpendingCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::Validation(ValidationError::invalid(format!(
                    "Unknown spending category '{}'",
                    s
                )))
            })
    }
}

/// A recorded spending transaction. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub department_id: String,
    pub amount: Decimal,
    pub category: SpendingCategory,
    pub description: Option<String>,
    pub occurred_at: NaiveDateTime,
    pub fiscal_year: i32,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a transaction against a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Decimal,
    #[serde(default)]
    pub category: SpendingCategory,
    pub description: Option<String>,
    /// Defaults to the time of recording.
    pub occurred_at: Option<NaiveDateTime>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::invalid(
                "Transaction amount must be positive",
            )));
        }
        Ok(())
    }
}

/// Fully resolved transaction handed to the repository.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub department_id: String,
    pub amount: Decimal,
    pub category: SpendingCategory,
    pub description: Option<String>,
    pub occurred_at: NaiveDateTime,
    pub fiscal_year: i32,
}

/// A department's transactions for one fiscal year and their running sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSpending {
    pub department_id: String,
    pub fiscal_year: i32,
    pub transactions: Vec<Transaction>,
    pub total: Decimal,
}

impl DepartmentSpending {
    pub fn from_transactions(
        department_id: impl Into<String>,
        fiscal_year: i32,
        mut transactions: Vec<Transaction>,
    ) -> Self {
        transactions.sort_by(|a, b| {
            a.occurred_at
                .cmp(&b.occurred_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        let total = transactions.iter().map(|t| t.amount).sum();
        Self {
            department_id: department_id.into(),
            fiscal_year,
            transactions,
            total,
        }
    }

    /// Spending recorded on or before `as_of`.
    pub fn through(self, as_of: NaiveDate) -> Self {
        let transactions: Vec<Transaction> = self
            .transactions
            .into_iter()
            .filter(|t| t.occurred_at.date() <= as_of)
            .collect();
        let total = transactions.iter().map(|t| t.amount).sum();
        Self {
            transactions,
            total,
            ..self
        }
    }
}
