// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The attendance correction aggregate.
//!
//! A correction is event-sourced: every workflow step appends a fact and
//! the status is derived from the newest one. The full trail (who
//! requested what, who rejected why, and the exact punches that were
//! approved) survives for audit and dispute resolution, which a mutable
//! status field could not provide.
//!
//! Workflow: `PENDING → {REJECTED, APPROVED, CANCELED}`, and
//! `REJECTED → PENDING` again via resubmission. Approved and canceled are
//! terminal.

use crate::correction_event::{
    AttendanceCorrectionEvent, AttendanceCorrectionStatus, CorrectionPunch,
};
use crate::entity_id::EntityId;
use crate::error::DomainError;
use crate::punch::Persistence;
use chrono::{NaiveDate, NaiveDateTime};

/// A user's correction request for one work date.
///
/// Identity is unique per `(user_id, work_date)`; the requesting use case
/// pre-checks for an existing aggregate before creating a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceCorrection {
    id: EntityId,
    user_id: EntityId,
    work_date: NaiveDate,
    reason: String,
    events: Vec<AttendanceCorrectionEvent>,
}

impl AttendanceCorrection {
    /// Files a new correction request.
    ///
    /// The new aggregate starts with a single `Requested` event and is
    /// therefore `Pending`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPunchCount` unless exactly one punch is
    /// requested.
    pub fn create(
        user_id: EntityId,
        work_date: NaiveDate,
        requested_by: String,
        requested_at: NaiveDateTime,
        reason: String,
        punches: Vec<CorrectionPunch>,
    ) -> Result<Self, DomainError> {
        Self::validate_punches(&punches)?;
        Self::validated(
            EntityId::generate(),
            user_id,
            work_date,
            reason.clone(),
            vec![AttendanceCorrectionEvent::Requested {
                occurred_at: requested_at,
                actor_user_id: requested_by,
                reason: Some(reason),
                punches,
                persistence: Persistence::Pending,
            }],
        )
    }

    /// Restores a correction loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyCorrectionEvents` if the event list is
    /// empty.
    pub fn reconstruct(
        id: EntityId,
        user_id: EntityId,
        work_date: NaiveDate,
        reason: String,
        events: Vec<AttendanceCorrectionEvent>,
    ) -> Result<Self, DomainError> {
        Self::validated(id, user_id, work_date, reason, events)
    }

    /// Approves the pending request.
    ///
    /// The approved punches are copied from the most recent `Requested`
    /// event (after a reject/resubmit cycle that is the resubmission, not
    /// the original request) and frozen into the `Approved` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ApproveRequiresPending` unless the status is
    /// `Pending`, or `DomainError::MissingRequestedEvent` if no request
    /// event exists to copy from.
    pub fn approve(
        &mut self,
        approved_by: String,
        approved_at: NaiveDateTime,
    ) -> Result<(), DomainError> {
        if self.status() != AttendanceCorrectionStatus::Pending {
            return Err(DomainError::ApproveRequiresPending);
        }

        let punches: Vec<CorrectionPunch> = self
            .latest_requested_punches()
            .ok_or(DomainError::MissingRequestedEvent)?
            .to_vec();

        self.events.push(AttendanceCorrectionEvent::Approved {
            occurred_at: approved_at,
            actor_user_id: approved_by,
            punches,
            persistence: Persistence::Pending,
        });
        Ok(())
    }

    /// Sends the pending request back to the requester.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RejectRequiresPending` unless the status is
    /// `Pending`.
    pub fn reject(
        &mut self,
        rejected_by: String,
        rejected_at: NaiveDateTime,
        comment: Option<String>,
    ) -> Result<(), DomainError> {
        if self.status() != AttendanceCorrectionStatus::Pending {
            return Err(DomainError::RejectRequiresPending);
        }

        self.events.push(AttendanceCorrectionEvent::Rejected {
            occurred_at: rejected_at,
            actor_user_id: rejected_by,
            comment,
            persistence: Persistence::Pending,
        });
        Ok(())
    }

    /// Withdraws the pending request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CancelRequiresPending` unless the status is
    /// `Pending`.
    pub fn cancel(
        &mut self,
        canceled_by: String,
        canceled_at: NaiveDateTime,
    ) -> Result<(), DomainError> {
        if self.status() != AttendanceCorrectionStatus::Pending {
            return Err(DomainError::CancelRequiresPending);
        }

        self.events.push(AttendanceCorrectionEvent::Canceled {
            occurred_at: canceled_at,
            actor_user_id: canceled_by,
            persistence: Persistence::Pending,
        });
        Ok(())
    }

    /// Files a new request after a rejection.
    ///
    /// The aggregate-level `reason` keeps the original request's reason;
    /// only the new `Requested` event carries the resubmission's reason.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ResubmitRequiresRejected` unless the status is
    /// `Rejected`, or `DomainError::InvalidPunchCount` unless exactly one
    /// punch is requested.
    pub fn resubmit(
        &mut self,
        requested_by: String,
        requested_at: NaiveDateTime,
        reason: Option<String>,
        punches: Vec<CorrectionPunch>,
    ) -> Result<(), DomainError> {
        if self.status() != AttendanceCorrectionStatus::Rejected {
            return Err(DomainError::ResubmitRequiresRejected);
        }
        Self::validate_punches(&punches)?;

        self.events.push(AttendanceCorrectionEvent::Requested {
            occurred_at: requested_at,
            actor_user_id: requested_by,
            reason,
            punches,
            persistence: Persistence::Pending,
        });
        Ok(())
    }

    /// Returns the punches of the latest `Approved` event, or an empty
    /// slice if the correction has not been approved.
    #[must_use]
    pub fn approved_punches(&self) -> &[CorrectionPunch] {
        for event in self.events.iter().rev() {
            if let AttendanceCorrectionEvent::Approved { punches, .. } = event {
                return punches;
            }
        }
        &[]
    }

    /// Derives the current status from the newest event.
    #[must_use]
    pub fn status(&self) -> AttendanceCorrectionStatus {
        match self.events.last() {
            Some(event) => event.status(),
            // The constructor rejects empty event lists.
            None => unreachable!("correction aggregate with no events"),
        }
    }

    /// Returns the correction's id.
    #[must_use]
    pub const fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the requesting user's id.
    #[must_use]
    pub const fn user_id(&self) -> &EntityId {
        &self.user_id
    }

    /// Returns the work date the correction targets.
    #[must_use]
    pub const fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    /// Returns the reason given with the first request.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the event log, in append order.
    #[must_use]
    pub fn events(&self) -> &[AttendanceCorrectionEvent] {
        &self.events
    }

    fn validated(
        id: EntityId,
        user_id: EntityId,
        work_date: NaiveDate,
        reason: String,
        events: Vec<AttendanceCorrectionEvent>,
    ) -> Result<Self, DomainError> {
        if events.is_empty() {
            return Err(DomainError::EmptyCorrectionEvents);
        }
        Ok(Self {
            id,
            user_id,
            work_date,
            reason,
            events,
        })
    }

    fn latest_requested_punches(&self) -> Option<&[CorrectionPunch]> {
        for event in self.events.iter().rev() {
            if let AttendanceCorrectionEvent::Requested { punches, .. } = event {
                return Some(punches);
            }
        }
        None
    }

    // The punch list stays a Vec for the planned multi-punch extension,
    // but today exactly one entry is accepted.
    fn validate_punches(punches: &[CorrectionPunch]) -> Result<(), DomainError> {
        if punches.len() != 1 {
            return Err(DomainError::InvalidPunchCount);
        }
        Ok(())
    }
}
