// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use kintai_domain::{DomainError, RepositoryError};

/// Errors that can occur while orchestrating a use case.
///
/// Not-found conditions live here, not in the domain: repositories signal
/// absence with `None`, and the use case is the layer that decides whether
/// absence is an error for the operation at hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The persistence layer failed.
    Repository(RepositoryError),
    /// No attendance record exists for the user and work date.
    RecordNotFound {
        /// The owning user.
        user_id: String,
        /// The requested work date.
        work_date: NaiveDate,
    },
    /// No correction exists for the user and work date.
    CorrectionNotFound {
        /// The owning user.
        user_id: String,
        /// The requested work date.
        work_date: NaiveDate,
    },
    /// No rule exists with the given id.
    RuleNotFound {
        /// The requested rule id.
        rule_id: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Repository(err) => write!(f, "Repository error: {err}"),
            Self::RecordNotFound { user_id, work_date } => {
                write!(f, "Attendance record not found: {user_id}:{work_date}")
            }
            Self::CorrectionNotFound { user_id, work_date } => {
                write!(f, "Attendance correction not found: {user_id}:{work_date}")
            }
            Self::RuleNotFound { rule_id } => {
                write!(f, "Attendance rule not found: {rule_id}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}
