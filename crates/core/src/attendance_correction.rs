// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The correction request workflow.
//!
//! One correction aggregate exists per user per work date; the request use
//! case pre-checks that before creating one. Approval is the only use case
//! touching two aggregates: it persists the correction's decision first,
//! then replays the approved punches onto the attendance record. The two
//! saves are separate storage operations, not one transaction, so a replay
//! conflict after the decision was saved surfaces to the caller.

use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use kintai_domain::{
    AttendanceCorrection, AttendanceCorrectionRepository, AttendanceRecord,
    AttendanceRecordRepository, CorrectionPunch, DomainError, EntityId, PunchType,
    apply_approved_punches_to_record,
};
use tracing::info;

/// Input for filing a new correction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCorrectionParams {
    /// The requesting user's id.
    pub user_id: String,
    /// The work date the correction targets.
    pub work_date: NaiveDate,
    /// Why the correction is needed.
    pub reason: String,
    /// The kind of punch to add.
    pub punch_type: PunchType,
    /// The wall-clock time the punch should have happened.
    pub occurred_at: NaiveDateTime,
    /// When the request is filed.
    pub requested_at: NaiveDateTime,
}

/// Input for approving a pending correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveCorrectionParams {
    /// The requesting user's id.
    pub user_id: String,
    /// The work date the correction targets.
    pub work_date: NaiveDate,
    /// The approving user's id.
    pub approved_by: String,
    /// When the approval happens.
    pub approved_at: NaiveDateTime,
}

/// Input for rejecting a pending correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectCorrectionParams {
    /// The requesting user's id.
    pub user_id: String,
    /// The work date the correction targets.
    pub work_date: NaiveDate,
    /// The rejecting user's id.
    pub rejected_by: String,
    /// When the rejection happens.
    pub rejected_at: NaiveDateTime,
    /// An optional comment for the requester.
    pub comment: Option<String>,
}

/// Input for withdrawing a pending correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelCorrectionParams {
    /// The requesting user's id.
    pub user_id: String,
    /// The work date the correction targets.
    pub work_date: NaiveDate,
    /// The withdrawing user's id.
    pub canceled_by: String,
    /// When the withdrawal happens.
    pub canceled_at: NaiveDateTime,
}

/// Input for resubmitting a rejected correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResubmitCorrectionParams {
    /// The requesting user's id.
    pub user_id: String,
    /// The work date the correction targets.
    pub work_date: NaiveDate,
    /// Why the correction is resubmitted, if given.
    pub reason: Option<String>,
    /// The kind of punch to add.
    pub punch_type: PunchType,
    /// The wall-clock time the punch should have happened.
    pub occurred_at: NaiveDateTime,
    /// When the resubmission is filed.
    pub requested_at: NaiveDateTime,
}

/// Files a new correction request for a user and work date.
///
/// # Errors
///
/// Returns `DomainError::CorrectionAlreadyExists` (wrapped) if a
/// correction already exists for the key, plus any domain or persistence
/// error.
pub async fn request_correction<Corrections>(
    corrections: &Corrections,
    params: RequestCorrectionParams,
) -> Result<(), CoreError>
where
    Corrections: AttendanceCorrectionRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let existing: Option<AttendanceCorrection> = corrections
        .find_by_user_and_date(&user_id, params.work_date)
        .await?;
    if existing.is_some() {
        return Err(DomainError::CorrectionAlreadyExists {
            user_id: params.user_id,
            work_date: params.work_date,
        }
        .into());
    }

    let correction: AttendanceCorrection = AttendanceCorrection::create(
        user_id.clone(),
        params.work_date,
        params.user_id,
        params.requested_at,
        params.reason,
        vec![CorrectionPunch {
            punch_type: params.punch_type,
            occurred_at: params.occurred_at,
        }],
    )?;
    corrections.save(&correction).await?;

    info!(
        user_id = %user_id,
        work_date = %params.work_date,
        punch_type = %params.punch_type,
        "correction requested"
    );
    Ok(())
}

/// Approves a pending correction and replays its punches onto the record.
///
/// # Errors
///
/// Returns `CoreError::CorrectionNotFound` or `CoreError::RecordNotFound`
/// when either aggregate is absent, plus any domain or persistence error,
/// including a record-state conflict from the replay.
pub async fn approve_correction<Corrections, Records>(
    corrections: &Corrections,
    records: &Records,
    params: ApproveCorrectionParams,
) -> Result<(), CoreError>
where
    Corrections: AttendanceCorrectionRepository,
    Records: AttendanceRecordRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let mut correction: AttendanceCorrection = corrections
        .find_by_user_and_date(&user_id, params.work_date)
        .await?
        .ok_or_else(|| CoreError::CorrectionNotFound {
            user_id: params.user_id.clone(),
            work_date: params.work_date,
        })?;
    correction.approve(params.approved_by, params.approved_at)?;
    corrections.save(&correction).await?;

    let mut record: AttendanceRecord = records
        .find_by_user_and_date(&user_id, params.work_date)
        .await?
        .ok_or_else(|| CoreError::RecordNotFound {
            user_id: params.user_id.clone(),
            work_date: params.work_date,
        })?;
    apply_approved_punches_to_record(&mut record, correction.approved_punches())?;
    records.save(&record).await?;

    info!(
        user_id = %user_id,
        work_date = %params.work_date,
        "correction approved and applied"
    );
    Ok(())
}

/// Sends a pending correction back to the requester.
///
/// # Errors
///
/// Returns `CoreError::CorrectionNotFound` when the correction is absent,
/// plus any domain or persistence error.
pub async fn reject_correction<Corrections>(
    corrections: &Corrections,
    params: RejectCorrectionParams,
) -> Result<(), CoreError>
where
    Corrections: AttendanceCorrectionRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let mut correction: AttendanceCorrection = corrections
        .find_by_user_and_date(&user_id, params.work_date)
        .await?
        .ok_or_else(|| CoreError::CorrectionNotFound {
            user_id: params.user_id.clone(),
            work_date: params.work_date,
        })?;
    correction.reject(params.rejected_by, params.rejected_at, params.comment)?;
    corrections.save(&correction).await?;

    info!(user_id = %user_id, work_date = %params.work_date, "correction rejected");
    Ok(())
}

/// Withdraws a pending correction.
///
/// # Errors
///
/// Returns `CoreError::CorrectionNotFound` when the correction is absent,
/// plus any domain or persistence error.
pub async fn cancel_correction<Corrections>(
    corrections: &Corrections,
    params: CancelCorrectionParams,
) -> Result<(), CoreError>
where
    Corrections: AttendanceCorrectionRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let mut correction: AttendanceCorrection = corrections
        .find_by_user_and_date(&user_id, params.work_date)
        .await?
        .ok_or_else(|| CoreError::CorrectionNotFound {
            user_id: params.user_id.clone(),
            work_date: params.work_date,
        })?;
    correction.cancel(params.canceled_by, params.canceled_at)?;
    corrections.save(&correction).await?;

    info!(user_id = %user_id, work_date = %params.work_date, "correction canceled");
    Ok(())
}

/// Resubmits a rejected correction with new content.
///
/// # Errors
///
/// Returns `CoreError::CorrectionNotFound` when the correction is absent,
/// plus any domain or persistence error.
pub async fn resubmit_correction<Corrections>(
    corrections: &Corrections,
    params: ResubmitCorrectionParams,
) -> Result<(), CoreError>
where
    Corrections: AttendanceCorrectionRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let mut correction: AttendanceCorrection = corrections
        .find_by_user_and_date(&user_id, params.work_date)
        .await?
        .ok_or_else(|| CoreError::CorrectionNotFound {
            user_id: params.user_id.clone(),
            work_date: params.work_date,
        })?;
    correction.resubmit(
        params.user_id,
        params.requested_at,
        params.reason,
        vec![CorrectionPunch {
            punch_type: params.punch_type,
            occurred_at: params.occurred_at,
        }],
    )?;
    corrections.save(&correction).await?;

    info!(
        user_id = %user_id,
        work_date = %params.work_date,
        punch_type = %params.punch_type,
        "correction resubmitted"
    );
    Ok(())
}
