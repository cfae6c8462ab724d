// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Correction workflow events.
//!
//! A correction aggregate is a log of these facts; its status is always the
//! mapped type of the newest one. The variants carry different payloads, so
//! they are a tagged union rather than a struct with optional fields;
//! status derivation relies on exhaustive matching over the four tags.

use crate::error::DomainError;
use crate::punch::{Persistence, PunchType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A punch requested or approved by a correction.
///
/// This type round-trips through a generic JSON column as
/// `[{"punchType": "...", "occurredAt": "..."}]`; the serde shape below is
/// that storage contract and must not drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionPunch {
    /// The kind of punch to replay onto the record.
    pub punch_type: PunchType,
    /// The wall-clock time the punch is about.
    pub occurred_at: NaiveDateTime,
}

/// Encodes a punch list into its JSON column representation.
///
/// # Errors
///
/// Returns the underlying serializer error (not expected for this shape).
pub fn encode_punches(punches: &[CorrectionPunch]) -> serde_json::Result<String> {
    serde_json::to_string(punches)
}

/// Decodes a punch list from its JSON column representation.
///
/// # Errors
///
/// Returns the underlying deserializer error if the column does not hold
/// the expected array shape.
pub fn decode_punches(json: &str) -> serde_json::Result<Vec<CorrectionPunch>> {
    serde_json::from_str(json)
}

/// The derived status of a correction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceCorrectionStatus {
    /// Awaiting a decision.
    Pending,
    /// Sent back to the requester; may be resubmitted.
    Rejected,
    /// Approved; terminal.
    Approved,
    /// Withdrawn by the requester; terminal.
    Canceled,
}

impl AttendanceCorrectionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
            Self::Approved => "APPROVED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for AttendanceCorrectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The tag of a correction event, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionEventKind {
    /// A request or resubmission was filed.
    Requested,
    /// The request was sent back.
    Rejected,
    /// The request was approved.
    Approved,
    /// The request was withdrawn.
    Canceled,
}

impl CorrectionEventKind {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Rejected => "REJECTED",
            Self::Approved => "APPROVED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl FromStr for CorrectionEventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUESTED" => Ok(Self::Requested),
            "REJECTED" => Ok(Self::Rejected),
            "APPROVED" => Ok(Self::Approved),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidCorrectionEventType(s.to_string())),
        }
    }
}

/// One fact in a correction's request/approval history.
///
/// All variants record when they happened and who acted; `Requested` and
/// `Approved` additionally carry the punch payload. The `Approved` payload
/// is a snapshot copied from the request it approved, so later events can
/// never retroactively change what was approved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceCorrectionEvent {
    /// A request or resubmission was filed.
    Requested {
        /// When the request was filed.
        occurred_at: NaiveDateTime,
        /// The requesting user.
        actor_user_id: String,
        /// The reason given with this request.
        reason: Option<String>,
        /// The punches requested (currently exactly one).
        punches: Vec<CorrectionPunch>,
        /// Storage state of this fact.
        persistence: Persistence,
    },
    /// The request was sent back to the requester.
    Rejected {
        /// When the rejection happened.
        occurred_at: NaiveDateTime,
        /// The rejecting user.
        actor_user_id: String,
        /// An optional comment for the requester.
        comment: Option<String>,
        /// Storage state of this fact.
        persistence: Persistence,
    },
    /// The request was approved.
    Approved {
        /// When the approval happened.
        occurred_at: NaiveDateTime,
        /// The approving user.
        actor_user_id: String,
        /// Snapshot of the approved punches.
        punches: Vec<CorrectionPunch>,
        /// Storage state of this fact.
        persistence: Persistence,
    },
    /// The request was withdrawn by the requester.
    Canceled {
        /// When the withdrawal happened.
        occurred_at: NaiveDateTime,
        /// The withdrawing user.
        actor_user_id: String,
        /// Storage state of this fact.
        persistence: Persistence,
    },
}

impl AttendanceCorrectionEvent {
    /// Returns the event's persisted tag.
    #[must_use]
    pub const fn kind(&self) -> CorrectionEventKind {
        match self {
            Self::Requested { .. } => CorrectionEventKind::Requested,
            Self::Rejected { .. } => CorrectionEventKind::Rejected,
            Self::Approved { .. } => CorrectionEventKind::Approved,
            Self::Canceled { .. } => CorrectionEventKind::Canceled,
        }
    }

    /// Returns the status a correction is in when this is its latest event.
    #[must_use]
    pub const fn status(&self) -> AttendanceCorrectionStatus {
        match self {
            Self::Requested { .. } => AttendanceCorrectionStatus::Pending,
            Self::Rejected { .. } => AttendanceCorrectionStatus::Rejected,
            Self::Approved { .. } => AttendanceCorrectionStatus::Approved,
            Self::Canceled { .. } => AttendanceCorrectionStatus::Canceled,
        }
    }

    /// Returns when the event happened.
    #[must_use]
    pub const fn occurred_at(&self) -> NaiveDateTime {
        match self {
            Self::Requested { occurred_at, .. }
            | Self::Rejected { occurred_at, .. }
            | Self::Approved { occurred_at, .. }
            | Self::Canceled { occurred_at, .. } => *occurred_at,
        }
    }

    /// Returns who acted.
    #[must_use]
    pub fn actor_user_id(&self) -> &str {
        match self {
            Self::Requested { actor_user_id, .. }
            | Self::Rejected { actor_user_id, .. }
            | Self::Approved { actor_user_id, .. }
            | Self::Canceled { actor_user_id, .. } => actor_user_id,
        }
    }

    /// Returns the event's storage state.
    #[must_use]
    pub const fn persistence(&self) -> Persistence {
        match self {
            Self::Requested { persistence, .. }
            | Self::Rejected { persistence, .. }
            | Self::Approved { persistence, .. }
            | Self::Canceled { persistence, .. } => *persistence,
        }
    }
}
