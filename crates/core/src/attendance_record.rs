// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Clock operations on the daily attendance record.
//!
//! Each use case is one load → mutate → save sequence. The record for a
//! work date is created lazily by the first punch of that day; rule
//! evaluation gates clock-in and clock-out before the record is touched.

use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use kintai_domain::{
    AttendanceRecord, AttendanceRecordRepository, AttendanceRule, AttendanceRuleRepository,
    EntityId, ensure_can_clock_in, ensure_can_clock_out,
};
use tracing::info;

/// Input for the four clock operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchParams {
    /// The punching user's id.
    pub user_id: String,
    /// The work date the punch belongs to.
    pub work_date: NaiveDate,
    /// The wall-clock time of the punch.
    pub occurred_at: NaiveDateTime,
}

/// Records a clock-in, creating the day's record if this is its first punch.
///
/// # Errors
///
/// Returns an error if the user id is malformed, an enabled rule forbids
/// the time, the record's state machine rejects the punch, or persistence
/// fails.
pub async fn clock_in<Records, Rules>(
    records: &Records,
    rules: &Rules,
    params: PunchParams,
) -> Result<(), CoreError>
where
    Records: AttendanceRecordRepository,
    Rules: AttendanceRuleRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let enabled: Vec<AttendanceRule> = rules.find_all_enabled().await?;
    ensure_can_clock_in(&enabled, params.occurred_at)?;

    let mut record: AttendanceRecord = load_or_new(records, &user_id, params.work_date).await?;
    record.clock_in(params.occurred_at)?;
    records.save(&record).await?;

    info!(user_id = %user_id, work_date = %params.work_date, "clock-in recorded");
    Ok(())
}

/// Records a clock-out.
///
/// # Errors
///
/// Returns an error if the user id is malformed, an enabled rule forbids
/// the time, the record's state machine rejects the punch, or persistence
/// fails.
pub async fn clock_out<Records, Rules>(
    records: &Records,
    rules: &Rules,
    params: PunchParams,
) -> Result<(), CoreError>
where
    Records: AttendanceRecordRepository,
    Rules: AttendanceRuleRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let enabled: Vec<AttendanceRule> = rules.find_all_enabled().await?;
    ensure_can_clock_out(&enabled, params.occurred_at)?;

    let mut record: AttendanceRecord = load_or_new(records, &user_id, params.work_date).await?;
    record.clock_out(params.occurred_at)?;
    records.save(&record).await?;

    info!(user_id = %user_id, work_date = %params.work_date, "clock-out recorded");
    Ok(())
}

/// Records the start of a break.
///
/// # Errors
///
/// Returns an error if the user id is malformed, the record's state
/// machine rejects the punch, or persistence fails.
pub async fn break_start<Records>(records: &Records, params: PunchParams) -> Result<(), CoreError>
where
    Records: AttendanceRecordRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let mut record: AttendanceRecord = load_or_new(records, &user_id, params.work_date).await?;
    record.break_start(params.occurred_at)?;
    records.save(&record).await?;

    info!(user_id = %user_id, work_date = %params.work_date, "break start recorded");
    Ok(())
}

/// Records the end of a break.
///
/// # Errors
///
/// Returns an error if the user id is malformed, the record's state
/// machine rejects the punch, or persistence fails.
pub async fn break_end<Records>(records: &Records, params: PunchParams) -> Result<(), CoreError>
where
    Records: AttendanceRecordRepository,
{
    let user_id: EntityId = EntityId::create(&params.user_id)?;

    let mut record: AttendanceRecord = load_or_new(records, &user_id, params.work_date).await?;
    record.break_end(params.occurred_at)?;
    records.save(&record).await?;

    info!(user_id = %user_id, work_date = %params.work_date, "break end recorded");
    Ok(())
}

/// An absent record is not an error for clock operations: the state
/// machine of a fresh record rejects everything except clock-in, which is
/// exactly the intended behavior for a day with no punches yet.
async fn load_or_new<Records>(
    records: &Records,
    user_id: &EntityId,
    work_date: NaiveDate,
) -> Result<AttendanceRecord, CoreError>
where
    Records: AttendanceRecordRepository,
{
    let record: AttendanceRecord = records
        .find_by_user_and_date(user_id, work_date)
        .await?
        .unwrap_or_else(|| AttendanceRecord::create(user_id.clone(), work_date, Vec::new()));
    Ok(record)
}
