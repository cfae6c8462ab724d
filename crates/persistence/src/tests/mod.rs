// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod correction_store_tests;
mod rule_store_tests;

use chrono::{NaiveDate, NaiveDateTime};

pub(crate) fn work_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 6).expect("valid work date")
}

pub(crate) fn at(hour: u32, minute: u32) -> NaiveDateTime {
    work_date().and_hms_opt(hour, minute, 0).expect("valid time")
}
