// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::{CreateRuleParams, UpdateRuleParams, create_rule, delete_rule, update_rule};
use kintai_domain::{
    AttendanceRuleRepository, DomainError, EntityId, RuleSetting, RuleTargetAction, RuleType,
};
use kintai_persistence::MemoryAttendanceRuleRepository;

fn clock_in_params(limit: &str, enabled: bool) -> CreateRuleParams {
    CreateRuleParams {
        targets: vec![RuleTargetAction::ClockIn],
        rule_type: RuleType::AllowClockInOnlyBeforeTime,
        setting: RuleSetting::AllowClockInOnlyBeforeTime {
            latest_clock_in_time: limit.to_string(),
        },
        enabled,
    }
}

#[tokio::test]
async fn test_create_rule_returns_the_stored_id() {
    let rules = MemoryAttendanceRuleRepository::new();

    let rule_id: EntityId = create_rule(&rules, clock_in_params("10:00", true))
        .await
        .expect("create succeeds");

    let stored = rules
        .find_by_id(&rule_id)
        .await
        .expect("lookup succeeds")
        .expect("rule exists");
    assert!(stored.is_enabled());
}

#[tokio::test]
async fn test_create_rule_rejects_type_setting_mismatch() {
    let rules = MemoryAttendanceRuleRepository::new();

    let result = create_rule(
        &rules,
        CreateRuleParams {
            targets: vec![RuleTargetAction::ClockIn],
            rule_type: RuleType::AllowClockInOnlyBeforeTime,
            setting: RuleSetting::AllowClockOutOnlyAfterTime {
                earliest_clock_out_time: String::from("17:00"),
            },
            enabled: true,
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::RuleTypeMismatch))
    ));
}

#[tokio::test]
async fn test_update_replaces_the_rule_wholesale() {
    let rules = MemoryAttendanceRuleRepository::new();
    let rule_id: EntityId = create_rule(&rules, clock_in_params("10:00", true))
        .await
        .expect("create succeeds");

    update_rule(
        &rules,
        UpdateRuleParams {
            rule_id: rule_id.value().to_string(),
            targets: vec![RuleTargetAction::ClockOut],
            rule_type: RuleType::AllowClockOutOnlyAfterTime,
            setting: RuleSetting::AllowClockOutOnlyAfterTime {
                earliest_clock_out_time: String::from("17:30"),
            },
            enabled: false,
        },
    )
    .await
    .expect("update succeeds");

    let stored = rules
        .find_by_id(&rule_id)
        .await
        .expect("lookup succeeds")
        .expect("rule exists");
    assert_eq!(stored.rule_type(), RuleType::AllowClockOutOnlyAfterTime);
    assert!(!stored.is_enabled());
}

#[tokio::test]
async fn test_update_of_unknown_rule_is_not_found() {
    let rules = MemoryAttendanceRuleRepository::new();
    let missing: EntityId = EntityId::generate();

    let result = update_rule(
        &rules,
        UpdateRuleParams {
            rule_id: missing.value().to_string(),
            targets: vec![RuleTargetAction::ClockIn],
            rule_type: RuleType::AllowClockInOnlyBeforeTime,
            setting: RuleSetting::AllowClockInOnlyBeforeTime {
                latest_clock_in_time: String::from("10:00"),
            },
            enabled: true,
        },
    )
    .await;

    assert!(matches!(result, Err(CoreError::RuleNotFound { .. })));
}

#[tokio::test]
async fn test_delete_removes_the_rule() {
    let rules = MemoryAttendanceRuleRepository::new();
    let rule_id: EntityId = create_rule(&rules, clock_in_params("10:00", true))
        .await
        .expect("create succeeds");

    delete_rule(&rules, rule_id.value())
        .await
        .expect("delete succeeds");

    assert!(rules
        .find_by_id(&rule_id)
        .await
        .expect("lookup succeeds")
        .is_none());
}

#[tokio::test]
async fn test_delete_of_unknown_rule_is_not_found() {
    let rules = MemoryAttendanceRuleRepository::new();

    let result = delete_rule(&rules, EntityId::generate().value()).await;

    assert!(matches!(result, Err(CoreError::RuleNotFound { .. })));
}
