// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Punch facts.
//!
//! A punch is a single timestamped work-timeline fact. Punches are written
//! once and never updated or deleted; the attendance record derives its
//! status from them instead of storing one.

use crate::entity_id::EntityId;
use crate::error::DomainError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of work-timeline fact a punch records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunchType {
    /// Start of the working day.
    ClockIn,
    /// End of the working day.
    ClockOut,
    /// Start of a break.
    BreakStart,
    /// End of a break.
    BreakEnd,
}

impl PunchType {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClockIn => "CLOCK_IN",
            Self::ClockOut => "CLOCK_OUT",
            Self::BreakStart => "BREAK_START",
            Self::BreakEnd => "BREAK_END",
        }
    }
}

impl FromStr for PunchType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLOCK_IN" => Ok(Self::ClockIn),
            "CLOCK_OUT" => Ok(Self::ClockOut),
            "BREAK_START" => Ok(Self::BreakStart),
            "BREAK_END" => Ok(Self::BreakEnd),
            _ => Err(DomainError::InvalidPunchType(s.to_string())),
        }
    }
}

impl std::fmt::Display for PunchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a punch came from the normal clock flow or from an approved
/// correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchSource {
    /// Recorded directly by the user's clock action.
    Normal,
    /// Replayed from an approved attendance correction.
    Correction,
}

impl PunchSource {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Correction => "CORRECTION",
        }
    }
}

impl FromStr for PunchSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(Self::Normal),
            "CORRECTION" => Ok(Self::Correction),
            _ => Err(DomainError::InvalidPunchSource(s.to_string())),
        }
    }
}

/// Marks whether a fact has been written to storage yet.
///
/// Repositories persist only `Pending` facts and stamp them with the
/// storage write time; everything else in an aggregate is already on disk
/// and re-saving it must be a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Created in this process and not yet saved.
    Pending,
    /// Loaded from storage.
    Persisted {
        /// The storage write time.
        created_at: NaiveDateTime,
    },
}

impl Persistence {
    /// Returns true if the fact has not been written to storage yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the storage write time, if the fact has been persisted.
    #[must_use]
    pub const fn created_at(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Pending => None,
            Self::Persisted { created_at } => Some(*created_at),
        }
    }
}

/// A single punch on an attendance record's timeline.
///
/// `occurred_at` is the wall-clock time the punch is about, supplied by the
/// caller; it is what status derivation sorts by, so backfilled punches
/// resolve correctly even when inserted out of order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchEvent {
    punch_type: PunchType,
    occurred_at: NaiveDateTime,
    persistence: Persistence,
    source: PunchSource,
    source_id: Option<EntityId>,
}

impl PunchEvent {
    /// Creates a new, not-yet-persisted punch.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is `Correction` without a `source_id`,
    /// or `Normal` with one.
    pub fn create(
        punch_type: PunchType,
        occurred_at: NaiveDateTime,
        source: PunchSource,
        source_id: Option<EntityId>,
    ) -> Result<Self, DomainError> {
        Self::validated(punch_type, occurred_at, Persistence::Pending, source, source_id)
    }

    /// Restores a punch loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the source/source-id pairing is inconsistent.
    pub fn reconstruct(
        punch_type: PunchType,
        occurred_at: NaiveDateTime,
        created_at: NaiveDateTime,
        source: PunchSource,
        source_id: Option<EntityId>,
    ) -> Result<Self, DomainError> {
        Self::validated(
            punch_type,
            occurred_at,
            Persistence::Persisted { created_at },
            source,
            source_id,
        )
    }

    fn validated(
        punch_type: PunchType,
        occurred_at: NaiveDateTime,
        persistence: Persistence,
        source: PunchSource,
        source_id: Option<EntityId>,
    ) -> Result<Self, DomainError> {
        match source {
            PunchSource::Correction if source_id.is_none() => {
                return Err(DomainError::CorrectionSourceIdMissing);
            }
            PunchSource::Normal if source_id.is_some() => {
                return Err(DomainError::NormalSourceIdPresent);
            }
            _ => {}
        }
        Ok(Self {
            punch_type,
            occurred_at,
            persistence,
            source,
            source_id,
        })
    }

    /// Returns the kind of fact this punch records.
    #[must_use]
    pub const fn punch_type(&self) -> PunchType {
        self.punch_type
    }

    /// Returns the wall-clock time the punch is about.
    #[must_use]
    pub const fn occurred_at(&self) -> NaiveDateTime {
        self.occurred_at
    }

    /// Returns the punch's persistence state.
    #[must_use]
    pub const fn persistence(&self) -> Persistence {
        self.persistence
    }

    /// Returns whether the punch came from the normal flow or a correction.
    #[must_use]
    pub const fn source(&self) -> PunchSource {
        self.source
    }

    /// Returns the originating correction's id, for correction punches.
    #[must_use]
    pub const fn source_id(&self) -> Option<&EntityId> {
        self.source_id.as_ref()
    }
}
