// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The attendance record aggregate.
//!
//! One record tracks one user's punches for one work date. The record is
//! append-only: each clock operation checks the derived status and pushes a
//! new punch fact; nothing is ever updated in place. Corrections live in a
//! separate aggregate and reach this one only through the approval
//! coordinator.

use crate::attendance_status::AttendanceStatus;
use crate::entity_id::EntityId;
use crate::error::DomainError;
use crate::punch::{PunchEvent, PunchSource, PunchType};
use chrono::{NaiveDate, NaiveDateTime};

/// A user's punch timeline for a single work date.
///
/// Identity is unique per `(user_id, work_date)`; the persistence layer
/// enforces that constraint on first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    id: EntityId,
    user_id: EntityId,
    work_date: NaiveDate,
    punch_events: Vec<PunchEvent>,
}

impl AttendanceRecord {
    /// Creates a new record with a generated id.
    #[must_use]
    pub fn create(user_id: EntityId, work_date: NaiveDate, punch_events: Vec<PunchEvent>) -> Self {
        Self {
            id: EntityId::generate(),
            user_id,
            work_date,
            punch_events,
        }
    }

    /// Restores a record loaded from storage.
    #[must_use]
    pub const fn reconstruct(
        id: EntityId,
        user_id: EntityId,
        work_date: NaiveDate,
        punch_events: Vec<PunchEvent>,
    ) -> Self {
        Self {
            id,
            user_id,
            work_date,
            punch_events,
        }
    }

    /// Records the start of the working day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecordState` unless the derived status
    /// is `NotStarted`.
    pub fn clock_in(&mut self, occurred_at: NaiveDateTime) -> Result<(), DomainError> {
        if !self.can_clock_in() {
            return Err(DomainError::InvalidRecordState {
                operation: "出勤",
                current_status: self.status(),
            });
        }
        self.append(PunchType::ClockIn, occurred_at)
    }

    /// Records the end of the working day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecordState` unless the derived status
    /// is `Working`.
    pub fn clock_out(&mut self, occurred_at: NaiveDateTime) -> Result<(), DomainError> {
        if !self.can_clock_out() {
            return Err(DomainError::InvalidRecordState {
                operation: "退勤",
                current_status: self.status(),
            });
        }
        self.append(PunchType::ClockOut, occurred_at)
    }

    /// Records the start of a break.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecordState` unless the derived status
    /// is `Working`.
    pub fn break_start(&mut self, occurred_at: NaiveDateTime) -> Result<(), DomainError> {
        if !self.can_break_start() {
            return Err(DomainError::InvalidRecordState {
                operation: "休憩の開始",
                current_status: self.status(),
            });
        }
        self.append(PunchType::BreakStart, occurred_at)
    }

    /// Records the end of a break.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecordState` unless the derived status
    /// is `Breaking`.
    pub fn break_end(&mut self, occurred_at: NaiveDateTime) -> Result<(), DomainError> {
        if !self.can_break_end() {
            return Err(DomainError::InvalidRecordState {
                operation: "休憩の終了",
                current_status: self.status(),
            });
        }
        self.append(PunchType::BreakEnd, occurred_at)
    }

    /// Returns true if a clock-in is currently legal.
    #[must_use]
    pub fn can_clock_in(&self) -> bool {
        self.status() == AttendanceStatus::NotStarted
    }

    /// Returns true if a clock-out is currently legal.
    #[must_use]
    pub fn can_clock_out(&self) -> bool {
        self.status() == AttendanceStatus::Working
    }

    /// Returns true if starting a break is currently legal.
    #[must_use]
    pub fn can_break_start(&self) -> bool {
        self.status() == AttendanceStatus::Working
    }

    /// Returns true if ending a break is currently legal.
    #[must_use]
    pub fn can_break_end(&self) -> bool {
        self.status() == AttendanceStatus::Breaking
    }

    /// Derives the current work status from the punch timeline.
    ///
    /// Only punches whose `occurred_at` falls on this record's work date
    /// count; a record never reacts to punches that belong to another day
    /// even if they are stored on the same aggregate. Among the punches
    /// that count, the one with the latest `occurred_at` decides, not the
    /// latest insertion, so backfilled punches resolve by event time.
    #[must_use]
    pub fn status(&self) -> AttendanceStatus {
        let mut latest: Option<&PunchEvent> = None;
        for punch in &self.punch_events {
            if punch.occurred_at().date() != self.work_date {
                continue;
            }
            match latest {
                Some(current) if punch.occurred_at() <= current.occurred_at() => {}
                _ => latest = Some(punch),
            }
        }

        latest.map_or(AttendanceStatus::NotStarted, |punch| {
            match punch.punch_type() {
                PunchType::ClockIn | PunchType::BreakEnd => AttendanceStatus::Working,
                PunchType::BreakStart => AttendanceStatus::Breaking,
                PunchType::ClockOut => AttendanceStatus::Finished,
            }
        })
    }

    /// Returns the record's id.
    #[must_use]
    pub const fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the owning user's id.
    #[must_use]
    pub const fn user_id(&self) -> &EntityId {
        &self.user_id
    }

    /// Returns the work date this record is scoped to.
    #[must_use]
    pub const fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    /// Returns the punch timeline, in append order.
    #[must_use]
    pub fn punch_events(&self) -> &[PunchEvent] {
        &self.punch_events
    }

    fn append(&mut self, punch_type: PunchType, occurred_at: NaiveDateTime) -> Result<(), DomainError> {
        let punch: PunchEvent =
            PunchEvent::create(punch_type, occurred_at, PunchSource::Normal, None)?;
        self.punch_events.push(punch);
        Ok(())
    }
}
