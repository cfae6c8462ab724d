// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{CorrectionEventRow, CorrectionRow};
use crate::{lock_store, write_time};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use kintai_domain::{
    AttendanceCorrection, AttendanceCorrectionEvent, AttendanceCorrectionRepository,
    CorrectionEventKind, CorrectionPunch, EntityId, Persistence, RepositoryError, decode_punches,
    encode_punches,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// In-memory store for attendance corrections.
///
/// The event list is held as rows with string tags and a JSON punch
/// column, in insertion order; reconstruction re-derives typed events from
/// the rows.
#[derive(Debug, Default)]
pub struct MemoryAttendanceCorrectionRepository {
    rows: Mutex<HashMap<(String, NaiveDate), CorrectionRow>>,
}

impl MemoryAttendanceCorrectionRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceCorrectionRepository for MemoryAttendanceCorrectionRepository {
    async fn find_by_user_and_date(
        &self,
        user_id: &EntityId,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceCorrection>, RepositoryError> {
        let rows = lock_store(&self.rows)?;
        let key: (String, NaiveDate) = (user_id.value().to_string(), work_date);

        let Some(row) = rows.get(&key) else {
            debug!(user_id = %user_id, work_date = %work_date, "correction not found");
            return Ok(None);
        };

        let correction: AttendanceCorrection = to_domain(row, user_id, work_date)?;
        debug!(
            user_id = %user_id,
            work_date = %work_date,
            events = correction.events().len(),
            "correction loaded"
        );
        Ok(Some(correction))
    }

    async fn save(&self, correction: &AttendanceCorrection) -> Result<(), RepositoryError> {
        let pending: Vec<&AttendanceCorrectionEvent> = correction
            .events()
            .iter()
            .filter(|event| event.persistence().is_pending())
            .collect();
        if pending.is_empty() {
            return Ok(());
        }

        let mut rows = lock_store(&self.rows)?;
        let key: (String, NaiveDate) = (
            correction.user_id().value().to_string(),
            correction.work_date(),
        );

        let row: &mut CorrectionRow = rows.entry(key).or_insert_with(|| CorrectionRow {
            id: correction.id().value().to_string(),
            reason: correction.reason().to_string(),
            events: Vec::new(),
        });
        if row.id != correction.id().value() {
            return Err(RepositoryError::DuplicateKey {
                user_id: correction.user_id().value().to_string(),
                work_date: correction.work_date(),
            });
        }

        let created_at: NaiveDateTime = write_time();
        let inserted: usize = pending.len();
        for event in pending {
            row.events.push(to_event_row(event, created_at)?);
        }

        debug!(
            user_id = %correction.user_id(),
            work_date = %correction.work_date(),
            inserted,
            "correction saved"
        );
        Ok(())
    }
}

fn to_event_row(
    event: &AttendanceCorrectionEvent,
    created_at: NaiveDateTime,
) -> Result<CorrectionEventRow, RepositoryError> {
    let encode = |punches: &[CorrectionPunch]| -> Result<Option<String>, RepositoryError> {
        encode_punches(punches)
            .map(Some)
            .map_err(|err| RepositoryError::Serialization(err.to_string()))
    };

    let row: CorrectionEventRow = match event {
        AttendanceCorrectionEvent::Requested {
            occurred_at,
            actor_user_id,
            reason,
            punches,
            ..
        } => CorrectionEventRow {
            event_type: CorrectionEventKind::Requested.as_str().to_string(),
            occurred_at: *occurred_at,
            actor_user_id: actor_user_id.clone(),
            reason: reason.clone(),
            comment: None,
            punches: encode(punches)?,
            created_at,
        },
        AttendanceCorrectionEvent::Rejected {
            occurred_at,
            actor_user_id,
            comment,
            ..
        } => CorrectionEventRow {
            event_type: CorrectionEventKind::Rejected.as_str().to_string(),
            occurred_at: *occurred_at,
            actor_user_id: actor_user_id.clone(),
            reason: None,
            comment: comment.clone(),
            punches: None,
            created_at,
        },
        AttendanceCorrectionEvent::Approved {
            occurred_at,
            actor_user_id,
            punches,
            ..
        } => CorrectionEventRow {
            event_type: CorrectionEventKind::Approved.as_str().to_string(),
            occurred_at: *occurred_at,
            actor_user_id: actor_user_id.clone(),
            reason: None,
            comment: None,
            punches: encode(punches)?,
            created_at,
        },
        AttendanceCorrectionEvent::Canceled {
            occurred_at,
            actor_user_id,
            ..
        } => CorrectionEventRow {
            event_type: CorrectionEventKind::Canceled.as_str().to_string(),
            occurred_at: *occurred_at,
            actor_user_id: actor_user_id.clone(),
            reason: None,
            comment: None,
            punches: None,
            created_at,
        },
    };
    Ok(row)
}

fn to_domain(
    row: &CorrectionRow,
    user_id: &EntityId,
    work_date: NaiveDate,
) -> Result<AttendanceCorrection, RepositoryError> {
    let mut events: Vec<AttendanceCorrectionEvent> = Vec::with_capacity(row.events.len());
    for event_row in &row.events {
        events.push(to_domain_event(event_row)?);
    }
    let id: EntityId = EntityId::reconstruct(&row.id)
        .map_err(|err| RepositoryError::Serialization(err.to_string()))?;
    AttendanceCorrection::reconstruct(id, user_id.clone(), work_date, row.reason.clone(), events)
        .map_err(|err| RepositoryError::Serialization(err.to_string()))
}

fn to_domain_event(row: &CorrectionEventRow) -> Result<AttendanceCorrectionEvent, RepositoryError> {
    let kind: CorrectionEventKind = row
        .event_type
        .parse()
        .map_err(|err: kintai_domain::DomainError| {
            RepositoryError::Serialization(err.to_string())
        })?;
    let punches: Vec<CorrectionPunch> = match &row.punches {
        Some(json) => {
            decode_punches(json).map_err(|err| RepositoryError::Serialization(err.to_string()))?
        }
        None => Vec::new(),
    };
    let persistence: Persistence = Persistence::Persisted {
        created_at: row.created_at,
    };

    let event: AttendanceCorrectionEvent = match kind {
        CorrectionEventKind::Requested => AttendanceCorrectionEvent::Requested {
            occurred_at: row.occurred_at,
            actor_user_id: row.actor_user_id.clone(),
            reason: row.reason.clone(),
            punches,
            persistence,
        },
        CorrectionEventKind::Rejected => AttendanceCorrectionEvent::Rejected {
            occurred_at: row.occurred_at,
            actor_user_id: row.actor_user_id.clone(),
            comment: row.comment.clone(),
            persistence,
        },
        CorrectionEventKind::Approved => AttendanceCorrectionEvent::Approved {
            occurred_at: row.occurred_at,
            actor_user_id: row.actor_user_id.clone(),
            punches,
            persistence,
        },
        CorrectionEventKind::Canceled => AttendanceCorrectionEvent::Canceled {
            occurred_at: row.occurred_at,
            actor_user_id: row.actor_user_id.clone(),
            persistence,
        },
    };
    Ok(event)
}
