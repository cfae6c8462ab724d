// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{at, user_id, work_date};
use crate::error::CoreError;
use crate::{
    ApproveCorrectionParams, CancelCorrectionParams, PunchParams, RejectCorrectionParams,
    RequestCorrectionParams, ResubmitCorrectionParams, approve_correction, cancel_correction,
    clock_in, reject_correction, request_correction, resubmit_correction,
};
use kintai_domain::{
    AttendanceCorrectionRepository, AttendanceCorrectionStatus, AttendanceRecordRepository,
    AttendanceStatus, DomainError, EntityId, PunchType,
};
use kintai_persistence::{
    MemoryAttendanceCorrectionRepository, MemoryAttendanceRecordRepository,
    MemoryAttendanceRuleRepository,
};

fn request_params(user: &str) -> RequestCorrectionParams {
    RequestCorrectionParams {
        user_id: user.to_string(),
        work_date: work_date(),
        reason: String::from("出勤打刻を忘れたため"),
        punch_type: PunchType::ClockIn,
        occurred_at: at(9, 5),
        requested_at: at(19, 0),
    }
}

fn approve_params(user: &str, manager: &str) -> ApproveCorrectionParams {
    ApproveCorrectionParams {
        user_id: user.to_string(),
        work_date: work_date(),
        approved_by: manager.to_string(),
        approved_at: at(20, 0),
    }
}

#[tokio::test]
async fn test_request_creates_a_pending_correction() {
    let corrections = MemoryAttendanceCorrectionRepository::new();
    let user: String = user_id();

    request_correction(&corrections, request_params(&user))
        .await
        .expect("request succeeds");

    let stored = corrections
        .find_by_user_and_date(&EntityId::create(&user).expect("valid id"), work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    assert_eq!(stored.status(), AttendanceCorrectionStatus::Pending);
}

#[tokio::test]
async fn test_duplicate_request_for_same_day_is_rejected() {
    let corrections = MemoryAttendanceCorrectionRepository::new();
    let user: String = user_id();
    request_correction(&corrections, request_params(&user))
        .await
        .expect("first request");

    let result = request_correction(&corrections, request_params(&user)).await;

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::CorrectionAlreadyExists { .. }
        ))
    ));
}

#[tokio::test]
async fn test_approval_replays_the_punch_onto_the_record() {
    let corrections = MemoryAttendanceCorrectionRepository::new();
    let records = MemoryAttendanceRecordRepository::new();
    let rules = MemoryAttendanceRuleRepository::new();
    let user: String = user_id();
    let manager: String = user_id();

    // The record exists because the user punched something that day.
    clock_in(
        &records,
        &rules,
        PunchParams {
            user_id: user.clone(),
            work_date: work_date(),
            occurred_at: at(9, 0),
        },
    )
    .await
    .expect("clock in");
    // A forgotten clock-out is requested as a correction.
    request_correction(
        &corrections,
        RequestCorrectionParams {
            user_id: user.clone(),
            work_date: work_date(),
            reason: String::from("退勤打刻を忘れたため"),
            punch_type: PunchType::ClockOut,
            occurred_at: at(18, 0),
            requested_at: at(19, 0),
        },
    )
    .await
    .expect("request");

    approve_correction(&corrections, &records, approve_params(&user, &manager))
        .await
        .expect("approve");

    let record = records
        .find_by_user_and_date(&EntityId::create(&user).expect("valid id"), work_date())
        .await
        .expect("lookup succeeds")
        .expect("record exists");
    assert_eq!(record.status(), AttendanceStatus::Finished);
    assert_eq!(record.punch_events().len(), 2);

    let correction = corrections
        .find_by_user_and_date(&EntityId::create(&user).expect("valid id"), work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    assert_eq!(correction.status(), AttendanceCorrectionStatus::Approved);
}

#[tokio::test]
async fn test_approval_without_a_record_is_not_found() {
    let corrections = MemoryAttendanceCorrectionRepository::new();
    let records = MemoryAttendanceRecordRepository::new();
    let user: String = user_id();
    let manager: String = user_id();
    request_correction(&corrections, request_params(&user))
        .await
        .expect("request");

    let result = approve_correction(&corrections, &records, approve_params(&user, &manager)).await;

    assert!(matches!(result, Err(CoreError::RecordNotFound { .. })));
}

#[tokio::test]
async fn test_approval_conflict_with_record_state_surfaces() {
    let corrections = MemoryAttendanceCorrectionRepository::new();
    let records = MemoryAttendanceRecordRepository::new();
    let rules = MemoryAttendanceRuleRepository::new();
    let user: String = user_id();
    let manager: String = user_id();

    clock_in(
        &records,
        &rules,
        PunchParams {
            user_id: user.clone(),
            work_date: work_date(),
            occurred_at: at(9, 0),
        },
    )
    .await
    .expect("clock in");
    // The user asks to add a clock-in although one is already recorded.
    request_correction(&corrections, request_params(&user))
        .await
        .expect("request");

    let result = approve_correction(&corrections, &records, approve_params(&user, &manager)).await;

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidRecordState { .. }
        ))
    ));
}

#[tokio::test]
async fn test_reject_then_resubmit_then_approve_uses_resubmitted_punch() {
    let corrections = MemoryAttendanceCorrectionRepository::new();
    let records = MemoryAttendanceRecordRepository::new();
    let user: String = user_id();
    let manager: String = user_id();
    request_correction(&corrections, request_params(&user))
        .await
        .expect("request");

    reject_correction(
        &corrections,
        RejectCorrectionParams {
            user_id: user.clone(),
            work_date: work_date(),
            rejected_by: manager.clone(),
            rejected_at: at(20, 0),
            comment: Some(String::from("時刻の根拠を確認してください")),
        },
    )
    .await
    .expect("reject");

    resubmit_correction(
        &corrections,
        ResubmitCorrectionParams {
            user_id: user.clone(),
            work_date: work_date(),
            reason: Some(String::from("勤務表を添付して再申請します")),
            punch_type: PunchType::ClockIn,
            occurred_at: at(9, 15),
            requested_at: at(21, 0),
        },
    )
    .await
    .expect("resubmit");

    approve_correction(
        &corrections,
        &records,
        ApproveCorrectionParams {
            user_id: user.clone(),
            work_date: work_date(),
            approved_by: manager,
            approved_at: at(22, 0),
        },
    )
    .await
    .expect_err("no record exists yet, so the replay fails");

    // The decision itself was saved before the replay failed.
    let correction = corrections
        .find_by_user_and_date(&EntityId::create(&user).expect("valid id"), work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    assert_eq!(correction.status(), AttendanceCorrectionStatus::Approved);
    assert_eq!(correction.approved_punches()[0].occurred_at, at(9, 15));
}

#[tokio::test]
async fn test_cancel_withdraws_a_pending_request() {
    let corrections = MemoryAttendanceCorrectionRepository::new();
    let user: String = user_id();
    request_correction(&corrections, request_params(&user))
        .await
        .expect("request");

    cancel_correction(
        &corrections,
        CancelCorrectionParams {
            user_id: user.clone(),
            work_date: work_date(),
            canceled_by: user.clone(),
            canceled_at: at(19, 30),
        },
    )
    .await
    .expect("cancel");

    let correction = corrections
        .find_by_user_and_date(&EntityId::create(&user).expect("valid id"), work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    assert_eq!(correction.status(), AttendanceCorrectionStatus::Canceled);
}

#[tokio::test]
async fn test_operations_on_missing_correction_are_not_found() {
    let corrections = MemoryAttendanceCorrectionRepository::new();
    let records = MemoryAttendanceRecordRepository::new();
    let user: String = user_id();
    let manager: String = user_id();

    let approve =
        approve_correction(&corrections, &records, approve_params(&user, &manager)).await;
    assert!(matches!(
        approve,
        Err(CoreError::CorrectionNotFound { .. })
    ));

    let reject = reject_correction(
        &corrections,
        RejectCorrectionParams {
            user_id: user.clone(),
            work_date: work_date(),
            rejected_by: manager,
            rejected_at: at(20, 0),
            comment: None,
        },
    )
    .await;
    assert!(matches!(reject, Err(CoreError::CorrectionNotFound { .. })));
}
