//! Database models for compliance calendar items.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use munifin_core::compliance::{ComplianceItem, ComplianceStatus};

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
#[diesel(table_name = crate::schema::compliance_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ComplianceItemDB {
    pub id: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub status: String,
    pub item_type: String,
    pub department_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<ComplianceItemDB> for ComplianceItem {
    fn from(db: ComplianceItemDB) -> Self {
        let status = ComplianceStatus::parse(&db.status).unwrap_or_else(|e| {
            log::warn!("Compliance item {}: {}", db.id, e);
            ComplianceStatus::Pending
        });
        Self {
            id: db.id,
            title: db.title,
            due_date: db.due_date,
            status,
            item_type: db.item_type,
            department_id: db.department_id,
            created_at: db.created_at,
        }
    }
}
