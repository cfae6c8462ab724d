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
mod error;

#[cfg(test)]
mod tests;

pub use attendance_correction::{
    ApproveCorrectionParams, CancelCorrectionParams, RejectCorrectionParams,
    RequestCorrectionParams, ResubmitCorrectionParams, approve_correction, cancel_correction,
    reject_correction, request_correction, resubmit_correction,
};
pub use attendance_record::{PunchParams, break_end, break_start, clock_in, clock_out};
pub use attendance_rule::{
    CreateRuleParams, UpdateRuleParams, create_rule, delete_rule, update_rule,
};
pub use error::CoreError;
