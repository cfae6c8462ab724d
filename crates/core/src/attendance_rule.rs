// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rule administration.
//!
//! Rules have plain CRUD semantics: an update replaces the stored rule
//! wholesale under the existing id. The type/setting invariant is enforced
//! by the aggregate's constructors on both paths.

use crate::error::CoreError;
use kintai_domain::{
    AttendanceRule, AttendanceRuleRepository, EntityId, RuleSetting, RuleTargetAction, RuleType,
};
use tracing::info;

/// Input for creating a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRuleParams {
    /// The punch actions the rule targets.
    pub targets: Vec<RuleTargetAction>,
    /// The declared rule type.
    pub rule_type: RuleType,
    /// The rule's concrete setting.
    pub setting: RuleSetting,
    /// Whether the rule starts enabled.
    pub enabled: bool,
}

/// Input for replacing a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRuleParams {
    /// The id of the rule to replace.
    pub rule_id: String,
    /// The punch actions the rule targets.
    pub targets: Vec<RuleTargetAction>,
    /// The declared rule type.
    pub rule_type: RuleType,
    /// The rule's concrete setting.
    pub setting: RuleSetting,
    /// Whether the rule is enabled.
    pub enabled: bool,
}

/// Creates a new rule and returns its generated id.
///
/// # Errors
///
/// Returns an error if the rule's type and setting disagree, or if
/// persistence fails.
pub async fn create_rule<Rules>(
    rules: &Rules,
    params: CreateRuleParams,
) -> Result<EntityId, CoreError>
where
    Rules: AttendanceRuleRepository,
{
    let rule: AttendanceRule = AttendanceRule::create(
        params.targets,
        params.rule_type,
        params.setting,
        params.enabled,
    )?;
    rules.create(&rule).await?;

    info!(rule_id = %rule.id(), rule_type = rule.rule_type().as_str(), "rule created");
    Ok(rule.id().clone())
}

/// Replaces a stored rule wholesale.
///
/// # Errors
///
/// Returns `CoreError::RuleNotFound` if no rule exists under the id, an
/// error if the replacement's type and setting disagree, or if persistence
/// fails.
pub async fn update_rule<Rules>(rules: &Rules, params: UpdateRuleParams) -> Result<(), CoreError>
where
    Rules: AttendanceRuleRepository,
{
    let rule_id: EntityId = EntityId::create(&params.rule_id)?;

    let existing: Option<AttendanceRule> = rules.find_by_id(&rule_id).await?;
    if existing.is_none() {
        return Err(CoreError::RuleNotFound {
            rule_id: params.rule_id,
        });
    }

    let replacement: AttendanceRule = AttendanceRule::reconstruct(
        rule_id.clone(),
        params.targets,
        params.rule_type,
        params.setting,
        params.enabled,
    )?;
    rules.update(&replacement).await?;

    info!(rule_id = %rule_id, "rule updated");
    Ok(())
}

/// Deletes a stored rule.
///
/// # Errors
///
/// Returns `CoreError::RuleNotFound` if no rule exists under the id, or an
/// error if persistence fails.
pub async fn delete_rule<Rules>(rules: &Rules, rule_id: &str) -> Result<(), CoreError>
where
    Rules: AttendanceRuleRepository,
{
    let id: EntityId = EntityId::create(rule_id)?;

    let rule: AttendanceRule =
        rules
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CoreError::RuleNotFound {
                rule_id: rule_id.to_string(),
            })?;
    rules.delete(&rule).await?;

    info!(rule_id = %id, "rule deleted");
    Ok(())
}
