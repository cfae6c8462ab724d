// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod attendance_correction;
mod attendance_record;
mod attendance_rule;
mod attendance_status;
mod correction_approval;
mod correction_event;
mod entity_id;
mod error;
mod punch;
mod repository;
mod rule_policy;
mod time_of_day;

#[cfg(test)]
mod tests;

pub use attendance_correction::AttendanceCorrection;
pub use attendance_record::AttendanceRecord;
pub use attendance_rule::{AttendanceRule, RuleSetting, RuleTargetAction, RuleType};
pub use attendance_status::AttendanceStatus;
pub use correction_approval::apply_approved_punches_to_record;
pub use correction_event::{
    AttendanceCorrectionEvent, AttendanceCorrectionStatus, CorrectionEventKind, CorrectionPunch,
    decode_punches, encode_punches,
};
pub use entity_id::EntityId;
pub use error::DomainError;
pub use punch::{Persistence, PunchEvent, PunchSource, PunchType};
pub use repository::{
    AttendanceCorrectionRepository, AttendanceRecordRepository, AttendanceRuleRepository,
    RepositoryError,
};
pub use rule_policy::{ensure_can_clock_in, ensure_can_clock_out};
pub use time_of_day::{is_after_or_equal, is_before_or_equal, parse_hhmm};
