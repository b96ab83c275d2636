use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::model::ComplianceItemDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::compliance_items;
use munifin_core::compliance::{ComplianceItem, ComplianceRepositoryTrait, NewComplianceItem};
use munifin_core::errors::Result;

pub struct ComplianceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ComplianceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ComplianceRepositoryTrait for ComplianceRepository {
    fn list_due_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ComplianceItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = compliance_items::table
            .filter(compliance_items::due_date.ge(from))
            .filter(compliance_items::due_date.le(to))
            .order((compliance_items::due_date.asc(), compliance_items::title.asc()))
            .select(ComplianceItemDB::as_select())
            .load::<ComplianceItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ComplianceItem::from).collect())
    }

    async fn create(&self, new_item: NewComplianceItem) -> Result<ComplianceItem> {
        let row = ComplianceItemDB {
            id: Uuid::new_v4().to_string(),
            title: new_item.title.trim().to_string(),
            due_date: new_item.due_date,
            status: new_item.status.as_str().to_string(),
            item_type: new_item.item_type.trim().to_string(),
            department_id: new_item.department_id,
            created_at: Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ComplianceItem> {
                let inserted = diesel::insert_into(compliance_items::table)
                    .values(&row)
                    .returning(ComplianceItemDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ComplianceItem::from(inserted))
            })
            .await
    }
}
