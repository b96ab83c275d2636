//! Compliance calendar models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Pending => "PENDING",
            ComplianceStatus::InProgress => "IN_PROGRESS",
            ComplianceStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "PENDING" => Ok(ComplianceStatus::Pending),
            "IN_PROGRESS" => Ok(ComplianceStatus::InProgress),
            "COMPLETED" => Ok(ComplianceStatus::Completed),
            other => Err(Error::Validation(ValidationError::invalid(format!(
                "Unknown compliance status '{}'",
                other
            )))),
        }
    }
}

/// A dated regulatory or reporting obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceItem {
    pub id: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub status: ComplianceStatus,
    pub item_type: String,
    pub department_id: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplianceItem {
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: ComplianceStatus,
    pub item_type: String,
    pub department_id: Option<String>,
}

impl NewComplianceItem {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if self.item_type.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "itemType".to_string(),
            )));
        }
        Ok(())
    }
}
