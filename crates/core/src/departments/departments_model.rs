//! Department domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::FISCAL_MONTHS;
use crate::errors::{Error, Result, ValidationError};

/// Allocation breakdown of a department budget.
///
/// Components are non-negative and are not required to sum to the budget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocations {
    pub personnel: Decimal,
    pub operations: Decimal,
    pub capital: Decimal,
}

impl BudgetAllocations {
    pub fn total(&self) -> Decimal {
        self.personnel + self.operations + self.capital
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("personnel", self.personnel),
            ("operations", self.operations),
            ("capital", self.capital),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(Error::Validation(ValidationError::invalid(format!(
                    "Allocation '{}' must not be negative",
                    name
                ))));
            }
        }
        Ok(())
    }
}

/// Domain model representing a municipal department for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub budget_code: String,
    pub fiscal_year: i32,
    pub budget: Decimal,
    pub allocations: BudgetAllocations,
    /// Relative spending weight of each fiscal month, first fiscal month first.
    pub seasonal_factors: Vec<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a department at fiscal-year setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub id: Option<String>,
    pub name: String,
    pub budget_code: String,
    pub fiscal_year: i32,
    pub budget: Decimal,
    #[serde(default)]
    pub allocations: BudgetAllocations,
    pub seasonal_factors: Option<Vec<f64>>,
}

impl NewDepartment {
    /// Validates the new department data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.budget_code.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "budgetCode".to_string(),
            )));
        }
        validate_budget_amount(self.budget)?;
        self.allocations.validate()?;
        if let Some(factors) = &self.seasonal_factors {
            validate_seasonal_factors(factors)?;
        }
        Ok(())
    }

    /// Seasonal factors to store, falling back to a uniform profile.
    pub fn resolved_seasonal_factors(&self) -> Vec<f64> {
        self.seasonal_factors
            .clone()
            .unwrap_or_else(uniform_seasonal_factors)
    }
}

/// Request body for an authorized budget update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub amount: Decimal,
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_budget_amount(self.amount)
    }
}

pub fn uniform_seasonal_factors() -> Vec<f64> {
    vec![1.0; FISCAL_MONTHS]
}

fn validate_budget_amount(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::Validation(ValidationError::invalid(
            "Budget amount must be a non-negative number",
        )));
    }
    Ok(())
}

pub fn validate_seasonal_factors(factors: &[f64]) -> Result<()> {
    if factors.len() != FISCAL_MONTHS {
        return Err(Error::Validation(ValidationError::invalid(format!(
            "Expected {} seasonal factors, got {}",
            FISCAL_MONTHS,
            factors.len()
        ))));
    }
    if factors.iter().any(|f| !f.is_finite() || *f < 0.0) {
        return Err(Error::Validation(ValidationError::invalid(
            "Seasonal factors must be finite and non-negative",
        )));
    }
    if factors.iter().sum::<f64>() <= 0.0 {
        return Err(Error::Validation(ValidationError::invalid(
            "Seasonal factors must not all be zero",
        )));
    }
    Ok(())
}
