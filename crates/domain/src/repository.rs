// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repository contracts.
//!
//! The domain specifies storage only by interface; the concrete technology
//! lives elsewhere. Two rules bind every implementation:
//!
//! - Absence is data, not an error: lookups return `Ok(None)`.
//! - Saves are delta-only: exactly the facts whose persistence state is
//!   `Pending` are inserted, stamped with the storage write time.
//!   Re-saving an aggregate whose facts are all persisted is a no-op.

use crate::attendance_correction::AttendanceCorrection;
use crate::attendance_record::AttendanceRecord;
use crate::attendance_rule::AttendanceRule;
use crate::entity_id::EntityId;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The `(user_id, work_date)` uniqueness constraint was violated.
    DuplicateKey {
        /// The owning user.
        user_id: String,
        /// The contested work date.
        work_date: NaiveDate,
    },
    /// Serialization or deserialization of a stored value failed.
    Serialization(String),
    /// The underlying store failed.
    Storage(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { user_id, work_date } => {
                write!(f, "Duplicate key: {user_id}:{work_date}")
            }
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Storage contract for [`AttendanceRecord`] aggregates.
#[async_trait]
pub trait AttendanceRecordRepository {
    /// Loads the record for a user and work date, if one exists.
    async fn find_by_user_and_date(
        &self,
        user_id: &EntityId,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, RepositoryError>;

    /// Persists the record's pending punches.
    async fn save(&self, record: &AttendanceRecord) -> Result<(), RepositoryError>;
}

/// Storage contract for [`AttendanceCorrection`] aggregates.
#[async_trait]
pub trait AttendanceCorrectionRepository {
    /// Loads the correction for a user and work date, if one exists.
    async fn find_by_user_and_date(
        &self,
        user_id: &EntityId,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceCorrection>, RepositoryError>;

    /// Persists the correction's pending events.
    async fn save(&self, correction: &AttendanceCorrection) -> Result<(), RepositoryError>;
}

/// Storage contract for [`AttendanceRule`] aggregates.
#[async_trait]
pub trait AttendanceRuleRepository {
    /// Loads a rule by id, if it exists.
    async fn find_by_id(
        &self,
        rule_id: &EntityId,
    ) -> Result<Option<AttendanceRule>, RepositoryError>;

    /// Loads every enabled rule, in a stable order.
    async fn find_all_enabled(&self) -> Result<Vec<AttendanceRule>, RepositoryError>;

    /// Stores a new rule.
    async fn create(&self, rule: &AttendanceRule) -> Result<(), RepositoryError>;

    /// Replaces a stored rule wholesale.
    async fn update(&self, rule: &AttendanceRule) -> Result<(), RepositoryError>;

    /// Removes a stored rule.
    async fn delete(&self, rule: &AttendanceRule) -> Result<(), RepositoryError>;
}
