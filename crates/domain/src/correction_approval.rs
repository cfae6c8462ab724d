// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Replay of approved correction punches onto an attendance record.
//!
//! This is the only place the two aggregates meet, and they meet by
//! parameter: neither holds a reference to the other, so each stays
//! independently loadable and persistable. The calling use case owns
//! loading and saving both sides.

use crate::attendance_record::AttendanceRecord;
use crate::correction_event::CorrectionPunch;
use crate::error::DomainError;
use crate::punch::PunchType;

/// Applies each approved punch to the record, in order, through the
/// record's own clock operations.
///
/// Legality stays with the record: approving a clock-in while the record
/// already shows `WORKING` surfaces the record's state error unchanged
/// rather than silently reconciling the conflict.
///
/// Replayed punches are recorded through the normal clock operations and
/// therefore carry `source=NORMAL`; see DESIGN.md for why this stays as is.
///
/// # Errors
///
/// Propagates `DomainError::InvalidRecordState` from the record untouched.
pub fn apply_approved_punches_to_record(
    record: &mut AttendanceRecord,
    approved_punches: &[CorrectionPunch],
) -> Result<(), DomainError> {
    for punch in approved_punches {
        match punch.punch_type {
            PunchType::ClockIn => record.clock_in(punch.occurred_at)?,
            PunchType::ClockOut => record.clock_out(punch.occurred_at)?,
            PunchType::BreakStart => record.break_start(punch.occurred_at)?,
            PunchType::BreakEnd => record.break_end(punch.occurred_at)?,
        }
    }
    Ok(())
}
