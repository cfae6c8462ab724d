// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The derived work status of an attendance record.
///
/// Status is never stored; it is recomputed from the punch timeline on
/// every query, so the record stays append-only and auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    /// No punch has been recorded for the work date yet.
    NotStarted,
    /// The user is clocked in and not on a break.
    Working,
    /// The user is on a break.
    Breaking,
    /// The user has clocked out.
    Finished,
}

impl AttendanceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::Working => "WORKING",
            Self::Breaking => "BREAKING",
            Self::Finished => "FINISHED",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
