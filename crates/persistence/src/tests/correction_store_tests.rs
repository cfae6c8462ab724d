// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{at, work_date};
use crate::MemoryAttendanceCorrectionRepository;
use kintai_domain::{
    AttendanceCorrection, AttendanceCorrectionEvent, AttendanceCorrectionRepository,
    AttendanceCorrectionStatus, CorrectionPunch, EntityId, PunchType,
};

fn pending_correction(user: &EntityId) -> AttendanceCorrection {
    AttendanceCorrection::create(
        user.clone(),
        work_date(),
        String::from("user-1"),
        at(19, 0),
        String::from("打刻を忘れたため"),
        vec![CorrectionPunch {
            punch_type: PunchType::ClockIn,
            occurred_at: at(9, 5),
        }],
    )
    .expect("valid correction")
}

#[tokio::test]
async fn test_save_and_reload_round_trips_the_event_log() {
    let store = MemoryAttendanceCorrectionRepository::new();
    let user: EntityId = EntityId::generate();
    let correction: AttendanceCorrection = pending_correction(&user);

    store.save(&correction).await.expect("save succeeds");
    let loaded: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");

    assert_eq!(loaded.id(), correction.id());
    assert_eq!(loaded.status(), AttendanceCorrectionStatus::Pending);
    assert_eq!(loaded.reason(), "打刻を忘れたため");
    assert_eq!(loaded.events().len(), 1);
    assert!(!loaded.events()[0].persistence().is_pending());

    // The punch list survived its trip through the JSON column.
    match &loaded.events()[0] {
        AttendanceCorrectionEvent::Requested { punches, .. } => {
            assert_eq!(
                punches,
                &vec![CorrectionPunch {
                    punch_type: PunchType::ClockIn,
                    occurred_at: at(9, 5),
                }]
            );
        }
        other => panic!("expected a requested event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_only_new_events_are_appended_on_save() {
    let store = MemoryAttendanceCorrectionRepository::new();
    let user: EntityId = EntityId::generate();
    store
        .save(&pending_correction(&user))
        .await
        .expect("first save");

    let mut loaded: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    loaded
        .approve(String::from("manager-1"), at(20, 0))
        .expect("approve pending");
    store.save(&loaded).await.expect("delta save");

    let reloaded: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    assert_eq!(reloaded.events().len(), 2);
    assert_eq!(reloaded.status(), AttendanceCorrectionStatus::Approved);
}

#[tokio::test]
async fn test_resaving_a_loaded_correction_inserts_nothing() {
    let store = MemoryAttendanceCorrectionRepository::new();
    let user: EntityId = EntityId::generate();
    store
        .save(&pending_correction(&user))
        .await
        .expect("first save");

    let loaded: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    store.save(&loaded).await.expect("no-op save");

    let reloaded: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    assert_eq!(reloaded.events().len(), 1);
}

#[tokio::test]
async fn test_full_workflow_survives_reload_between_every_step() {
    let store = MemoryAttendanceCorrectionRepository::new();
    let user: EntityId = EntityId::generate();
    store
        .save(&pending_correction(&user))
        .await
        .expect("request saved");

    let mut correction: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    correction
        .reject(
            String::from("manager-1"),
            at(20, 0),
            Some(String::from("時刻の根拠が不明です")),
        )
        .expect("reject pending");
    store.save(&correction).await.expect("rejection saved");

    let mut correction: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    correction
        .resubmit(
            String::from("user-1"),
            at(21, 0),
            Some(String::from("勤務表を添付して再申請します")),
            vec![CorrectionPunch {
                punch_type: PunchType::ClockIn,
                occurred_at: at(9, 10),
            }],
        )
        .expect("resubmit rejected");
    store.save(&correction).await.expect("resubmission saved");

    let mut correction: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    correction
        .approve(String::from("manager-1"), at(22, 0))
        .expect("approve resubmission");
    store.save(&correction).await.expect("approval saved");

    let final_state: AttendanceCorrection = store
        .find_by_user_and_date(&user, work_date())
        .await
        .expect("lookup succeeds")
        .expect("correction exists");
    assert_eq!(final_state.status(), AttendanceCorrectionStatus::Approved);
    assert_eq!(final_state.events().len(), 4);
    // The approval froze the resubmitted punch, not the original.
    assert_eq!(
        final_state.approved_punches(),
        &[CorrectionPunch {
            punch_type: PunchType::ClockIn,
            occurred_at: at(9, 10),
        }]
    );
}
