// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rule-set evaluation for punch authorization.
//!
//! The policy answers one question: is this timestamp allowed by the
//! active rules? Whether the punch is legal given the record's history
//! (double clock-in and the like) stays with `AttendanceRecord`.
//!
//! Rules that are disabled or that do not target the action are skipped;
//! every remaining rule must pass.

use crate::attendance_rule::{AttendanceRule, RuleSetting, RuleTargetAction};
use crate::error::DomainError;
use crate::time_of_day;
use chrono::NaiveDateTime;

/// Checks a clock-in time against every applicable rule.
///
/// # Errors
///
/// Returns `DomainError::ClockInDeadlineExceeded` on the first enabled
/// clock-in rule whose limit is violated (the limit is inclusive), or
/// `DomainError::InvalidTimeFormat` if a rule carries a malformed limit.
pub fn ensure_can_clock_in(
    rules: &[AttendanceRule],
    occurred_at: NaiveDateTime,
) -> Result<(), DomainError> {
    for rule in applicable(rules, RuleTargetAction::ClockIn) {
        if let RuleSetting::AllowClockInOnlyBeforeTime {
            latest_clock_in_time,
        } = rule.setting()
        {
            if !time_of_day::is_before_or_equal(occurred_at, latest_clock_in_time)? {
                return Err(DomainError::ClockInDeadlineExceeded {
                    latest_clock_in_time: latest_clock_in_time.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Checks a clock-out time against every applicable rule.
///
/// # Errors
///
/// Returns `DomainError::ClockOutNotYetAllowed` on the first enabled
/// clock-out rule whose limit is violated (the limit is inclusive), or
/// `DomainError::InvalidTimeFormat` if a rule carries a malformed limit.
pub fn ensure_can_clock_out(
    rules: &[AttendanceRule],
    occurred_at: NaiveDateTime,
) -> Result<(), DomainError> {
    for rule in applicable(rules, RuleTargetAction::ClockOut) {
        if let RuleSetting::AllowClockOutOnlyAfterTime {
            earliest_clock_out_time,
        } = rule.setting()
        {
            if !time_of_day::is_after_or_equal(occurred_at, earliest_clock_out_time)? {
                return Err(DomainError::ClockOutNotYetAllowed {
                    earliest_clock_out_time: earliest_clock_out_time.clone(),
                });
            }
        }
    }
    Ok(())
}

fn applicable(
    rules: &[AttendanceRule],
    action: RuleTargetAction,
) -> impl Iterator<Item = &AttendanceRule> {
    rules.iter().filter(move |rule| rule.applies_to(action))
}
