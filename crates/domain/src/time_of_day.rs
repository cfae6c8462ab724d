// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-of-day comparisons for rule evaluation.
//!
//! Rule settings carry their limits as `HH:MM` strings; this module parses
//! them and compares an instant's local time of day against them. Dates are
//! ignored on purpose: a rule about "no clock-in after 10:00" applies to
//! every day it is enabled.

use crate::error::DomainError;
use chrono::{NaiveDateTime, Timelike};

/// Parses an `HH:MM` limit into minutes since midnight.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeFormat` unless `0 <= H <= 23` and
/// `0 <= M <= 59` ("24:00" is rejected).
pub fn parse_hhmm(value: &str) -> Result<u32, DomainError> {
    let invalid = || DomainError::InvalidTimeFormat(value.to_string());

    let (hours_part, minutes_part) = value.split_once(':').ok_or_else(invalid)?;
    if !is_digits(hours_part) || !is_digits(minutes_part) {
        return Err(invalid());
    }
    let hours: u32 = hours_part.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes_part.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Returns true if `at`'s time of day is at or before the `HH:MM` limit.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeFormat` if the limit does not parse.
pub fn is_before_or_equal(at: NaiveDateTime, hhmm: &str) -> Result<bool, DomainError> {
    Ok(minutes_of_day(at) <= parse_hhmm(hhmm)?)
}

/// Returns true if `at`'s time of day is at or after the `HH:MM` limit.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeFormat` if the limit does not parse.
pub fn is_after_or_equal(at: NaiveDateTime, hhmm: &str) -> Result<bool, DomainError> {
    Ok(minutes_of_day(at) >= parse_hhmm(hhmm)?)
}

/// Seconds are ignored: the limit has minute granularity, so an instant
/// anywhere inside the limit minute still counts as that minute.
fn minutes_of_day(at: NaiveDateTime) -> u32 {
    at.hour() * 60 + at.minute()
}

fn is_digits(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}
