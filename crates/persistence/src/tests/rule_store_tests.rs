// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::MemoryAttendanceRuleRepository;
use kintai_domain::{
    AttendanceRule, AttendanceRuleRepository, RepositoryError, RuleSetting, RuleTargetAction,
    RuleType,
};

fn clock_in_rule(limit: &str, enabled: bool) -> AttendanceRule {
    AttendanceRule::create(
        vec![RuleTargetAction::ClockIn],
        RuleType::AllowClockInOnlyBeforeTime,
        RuleSetting::AllowClockInOnlyBeforeTime {
            latest_clock_in_time: limit.to_string(),
        },
        enabled,
    )
    .expect("valid rule")
}

#[tokio::test]
async fn test_create_then_find_by_id() {
    let store = MemoryAttendanceRuleRepository::new();
    let rule: AttendanceRule = clock_in_rule("10:00", true);

    store.create(&rule).await.expect("create succeeds");
    let found = store
        .find_by_id(rule.id())
        .await
        .expect("lookup succeeds")
        .expect("rule exists");

    assert_eq!(found, rule);
}

#[tokio::test]
async fn test_find_all_enabled_skips_disabled_rules() {
    let store = MemoryAttendanceRuleRepository::new();
    let enabled: AttendanceRule = clock_in_rule("10:00", true);
    let disabled: AttendanceRule = clock_in_rule("11:00", false);
    store.create(&enabled).await.expect("create enabled");
    store.create(&disabled).await.expect("create disabled");

    let found = store.find_all_enabled().await.expect("lookup succeeds");

    assert_eq!(found, vec![enabled]);
}

#[tokio::test]
async fn test_update_replaces_the_stored_rule() {
    let store = MemoryAttendanceRuleRepository::new();
    let rule: AttendanceRule = clock_in_rule("10:00", true);
    store.create(&rule).await.expect("create succeeds");

    let replacement = AttendanceRule::reconstruct(
        rule.id().clone(),
        vec![RuleTargetAction::ClockIn],
        RuleType::AllowClockInOnlyBeforeTime,
        RuleSetting::AllowClockInOnlyBeforeTime {
            latest_clock_in_time: String::from("09:30"),
        },
        false,
    )
    .expect("valid replacement");
    store.update(&replacement).await.expect("update succeeds");

    let found = store
        .find_by_id(rule.id())
        .await
        .expect("lookup succeeds")
        .expect("rule exists");
    assert_eq!(found, replacement);
    assert!(store
        .find_all_enabled()
        .await
        .expect("lookup succeeds")
        .is_empty());
}

#[tokio::test]
async fn test_update_of_unknown_rule_fails() {
    let store = MemoryAttendanceRuleRepository::new();

    let result = store.update(&clock_in_rule("10:00", true)).await;

    assert!(matches!(result, Err(RepositoryError::Storage(_))));
}

#[tokio::test]
async fn test_delete_removes_the_rule() {
    let store = MemoryAttendanceRuleRepository::new();
    let rule: AttendanceRule = clock_in_rule("10:00", true);
    store.create(&rule).await.expect("create succeeds");

    store.delete(&rule).await.expect("delete succeeds");

    assert!(store
        .find_by_id(rule.id())
        .await
        .expect("lookup succeeds")
        .is_none());
}
