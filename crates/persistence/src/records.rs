// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{PunchRow, RecordRow};
use crate::{lock_store, write_time};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use kintai_domain::{
    AttendanceRecord, AttendanceRecordRepository, EntityId, PunchEvent, PunchSource, PunchType,
    RepositoryError,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// In-memory store for attendance records.
///
/// Rows are keyed by `(user_id, work_date)`; the map key is the uniqueness
/// constraint a relational schema would declare on those columns.
#[derive(Debug, Default)]
pub struct MemoryAttendanceRecordRepository {
    rows: Mutex<HashMap<(String, NaiveDate), RecordRow>>,
}

impl MemoryAttendanceRecordRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceRecordRepository for MemoryAttendanceRecordRepository {
    async fn find_by_user_and_date(
        &self,
        user_id: &EntityId,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, RepositoryError> {
        let rows = lock_store(&self.rows)?;
        let key: (String, NaiveDate) = (user_id.value().to_string(), work_date);

        let Some(row) = rows.get(&key) else {
            debug!(user_id = %user_id, work_date = %work_date, "attendance record not found");
            return Ok(None);
        };

        let record: AttendanceRecord = to_domain(row, user_id, work_date)?;
        debug!(
            user_id = %user_id,
            work_date = %work_date,
            punches = record.punch_events().len(),
            "attendance record loaded"
        );
        Ok(Some(record))
    }

    async fn save(&self, record: &AttendanceRecord) -> Result<(), RepositoryError> {
        let pending: Vec<&PunchEvent> = record
            .punch_events()
            .iter()
            .filter(|punch| punch.persistence().is_pending())
            .collect();
        if pending.is_empty() {
            return Ok(());
        }

        let mut rows = lock_store(&self.rows)?;
        let key: (String, NaiveDate) = (record.user_id().value().to_string(), record.work_date());

        let row: &mut RecordRow = rows.entry(key).or_insert_with(|| RecordRow {
            id: record.id().value().to_string(),
            punches: Vec::new(),
        });
        if row.id != record.id().value() {
            return Err(RepositoryError::DuplicateKey {
                user_id: record.user_id().value().to_string(),
                work_date: record.work_date(),
            });
        }

        let created_at: NaiveDateTime = write_time();
        let inserted: usize = pending.len();
        for punch in pending {
            row.punches.push(PunchRow {
                punch_type: punch.punch_type().as_str().to_string(),
                occurred_at: punch.occurred_at(),
                created_at,
                source: punch.source().as_str().to_string(),
                source_id: punch.source_id().map(|id| id.value().to_string()),
            });
        }

        debug!(
            user_id = %record.user_id(),
            work_date = %record.work_date(),
            inserted,
            "attendance record saved"
        );
        Ok(())
    }
}

fn to_domain(
    row: &RecordRow,
    user_id: &EntityId,
    work_date: NaiveDate,
) -> Result<AttendanceRecord, RepositoryError> {
    let mut punches: Vec<PunchEvent> = Vec::with_capacity(row.punches.len());
    for punch_row in &row.punches {
        punches.push(to_domain_punch(punch_row)?);
    }
    let id: EntityId = EntityId::reconstruct(&row.id)
        .map_err(|err| RepositoryError::Serialization(err.to_string()))?;
    Ok(AttendanceRecord::reconstruct(
        id,
        user_id.clone(),
        work_date,
        punches,
    ))
}

fn to_domain_punch(row: &PunchRow) -> Result<PunchEvent, RepositoryError> {
    let punch_type: PunchType = row
        .punch_type
        .parse()
        .map_err(|err: kintai_domain::DomainError| {
            RepositoryError::Serialization(err.to_string())
        })?;
    let source: PunchSource = row
        .source
        .parse()
        .map_err(|err: kintai_domain::DomainError| {
            RepositoryError::Serialization(err.to_string())
        })?;
    let source_id: Option<EntityId> = match &row.source_id {
        Some(value) => Some(
            EntityId::reconstruct(value)
                .map_err(|err| RepositoryError::Serialization(err.to_string()))?,
        ),
        None => None,
    };
    PunchEvent::reconstruct(punch_type, row.occurred_at, row.created_at, source, source_id)
        .map_err(|err| RepositoryError::Serialization(err.to_string()))
}
