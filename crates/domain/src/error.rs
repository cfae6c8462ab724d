// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::attendance_status::AttendanceStatus;
use chrono::NaiveDate;

/// Errors that can occur during domain validation and state transitions.
///
/// All user-facing messages are kept in Japanese, matching the product's
/// audience. Callers translate these into transport-level responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier string does not have the expected ULID shape.
    InvalidIdentifier(String),
    /// A punch was attempted from a work status that does not permit it.
    InvalidRecordState {
        /// The attempted operation, in display form (出勤, 退勤, ...).
        operation: &'static str,
        /// The derived work status at the time of the attempt.
        current_status: AttendanceStatus,
    },
    /// A correction-sourced punch was constructed without its correction id.
    CorrectionSourceIdMissing,
    /// A normal punch was constructed with a correction id attached.
    NormalSourceIdPresent,
    /// A punch type string from storage is not recognized.
    InvalidPunchType(String),
    /// A punch source string from storage is not recognized.
    InvalidPunchSource(String),
    /// A correction aggregate was constructed with no events.
    EmptyCorrectionEvents,
    /// A correction event type string from storage is not recognized.
    InvalidCorrectionEventType(String),
    /// Approval was attempted on a correction that is not pending.
    ApproveRequiresPending,
    /// Rejection was attempted on a correction that is not pending.
    RejectRequiresPending,
    /// Cancellation was attempted on a correction that is not pending.
    CancelRequiresPending,
    /// Resubmission was attempted on a correction that is not rejected.
    ResubmitRequiresRejected,
    /// Approval found no request event to copy punches from.
    MissingRequestedEvent,
    /// A correction carried a punch list that is not exactly one entry.
    InvalidPunchCount,
    /// A correction request already exists for the user and work date.
    CorrectionAlreadyExists {
        /// The requesting user.
        user_id: String,
        /// The work date of the duplicate request.
        work_date: NaiveDate,
    },
    /// A rule's declared type does not match its setting variant.
    RuleTypeMismatch,
    /// A rule target action string from storage is not recognized.
    InvalidRuleTargetAction(String),
    /// A rule type string from storage is not recognized.
    InvalidRuleType(String),
    /// A time-of-day limit string is not a valid `HH:MM` value.
    InvalidTimeFormat(String),
    /// A clock-in was attempted after the latest permitted time.
    ClockInDeadlineExceeded {
        /// The `HH:MM` limit from the violated rule.
        latest_clock_in_time: String,
    },
    /// A clock-out was attempted before the earliest permitted time.
    ClockOutNotYetAllowed {
        /// The `HH:MM` limit from the violated rule.
        earliest_clock_out_time: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier(value) => write!(f, "無効なID形式です:{value}"),
            Self::InvalidRecordState {
                operation,
                current_status,
            } => {
                write!(
                    f,
                    "{operation}ができません。現在のステータス: {current_status}"
                )
            }
            Self::CorrectionSourceIdMissing => write!(f, "修正打刻にはsourceIdが必要です"),
            Self::NormalSourceIdPresent => write!(f, "通常打刻にはsourceIdを指定できません"),
            Self::InvalidPunchType(value) => write!(f, "不正な打刻種別です: {value}"),
            Self::InvalidPunchSource(value) => write!(f, "不正な打刻区分です: {value}"),
            Self::EmptyCorrectionEvents => write!(f, "勤怠修正のイベントが存在しません"),
            Self::InvalidCorrectionEventType(value) => {
                write!(f, "不正な勤怠修正イベント種別です: {value}")
            }
            Self::ApproveRequiresPending => {
                write!(f, "申請中以外の勤怠修正は承認できません")
            }
            Self::RejectRequiresPending => {
                write!(f, "申請中以外の勤怠修正は差し戻しできません")
            }
            Self::CancelRequiresPending => {
                write!(f, "申請中以外の勤怠修正は取り下げできません")
            }
            Self::ResubmitRequiresRejected => {
                write!(f, "差し戻し以外の勤怠修正は再申請できません")
            }
            Self::MissingRequestedEvent => {
                write!(f, "申請内容が存在しないため承認できません")
            }
            Self::InvalidPunchCount => write!(f, "修正内容は1件のみ指定できます"),
            Self::CorrectionAlreadyExists { user_id, work_date } => {
                write!(
                    f,
                    "すでに勤怠修正申請が存在します: {user_id}:{work_date}"
                )
            }
            Self::RuleTypeMismatch => {
                write!(
                    f,
                    "勤怠ルール定義が不正です（typeとsetting.typeが一致しません）"
                )
            }
            Self::InvalidRuleTargetAction(value) => {
                write!(f, "不正なルール対象です: {value}")
            }
            Self::InvalidRuleType(value) => write!(f, "不正なルール種別です: {value}"),
            Self::InvalidTimeFormat(value) => write!(f, "不正な時刻形式です: {value}"),
            Self::ClockInDeadlineExceeded {
                latest_clock_in_time,
            } => {
                write!(f, "出勤打刻は{latest_clock_in_time}までです")
            }
            Self::ClockOutNotYetAllowed {
                earliest_clock_out_time,
            } => {
                write!(f, "退勤打刻は{earliest_clock_out_time}以降に可能です")
            }
        }
    }
}

impl std::error::Error for DomainError {}
