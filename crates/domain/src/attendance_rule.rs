// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance rules.
//!
//! A rule guards its single invariant: the declared type must match the
//! setting variant. Whether a punch at a given time passes the active rule
//! set is decided in [`crate::rule_policy`], which consumes rules read-only.

use crate::entity_id::EntityId;
use crate::error::DomainError;
use std::str::FromStr;

/// The punch action a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTargetAction {
    /// Clock-in punches.
    ClockIn,
    /// Clock-out punches.
    ClockOut,
    /// Break-start punches.
    BreakStart,
    /// Break-end punches.
    BreakEnd,
}

impl RuleTargetAction {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClockIn => "CLOCK_IN",
            Self::ClockOut => "CLOCK_OUT",
            Self::BreakStart => "BREAK_START",
            Self::BreakEnd => "BREAK_END",
        }
    }
}

impl FromStr for RuleTargetAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLOCK_IN" => Ok(Self::ClockIn),
            "CLOCK_OUT" => Ok(Self::ClockOut),
            "BREAK_START" => Ok(Self::BreakStart),
            "BREAK_END" => Ok(Self::BreakEnd),
            _ => Err(DomainError::InvalidRuleTargetAction(s.to_string())),
        }
    }
}

/// The named kind of constraint a rule expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    /// Clock-in is only allowed up to a time of day.
    AllowClockInOnlyBeforeTime,
    /// Clock-out is only allowed from a time of day.
    AllowClockOutOnlyAfterTime,
}

impl RuleType {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AllowClockInOnlyBeforeTime => "ALLOW_CLOCK_IN_ONLY_BEFORE_TIME",
            Self::AllowClockOutOnlyAfterTime => "ALLOW_CLOCK_OUT_ONLY_AFTER_TIME",
        }
    }
}

impl FromStr for RuleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALLOW_CLOCK_IN_ONLY_BEFORE_TIME" => Ok(Self::AllowClockInOnlyBeforeTime),
            "ALLOW_CLOCK_OUT_ONLY_AFTER_TIME" => Ok(Self::AllowClockOutOnlyAfterTime),
            _ => Err(DomainError::InvalidRuleType(s.to_string())),
        }
    }
}

/// The concrete parameters of a rule, tagged by the same vocabulary as
/// [`RuleType`].
///
/// Limits are kept as `HH:MM` strings and parsed at evaluation time, so a
/// malformed limit surfaces when the rule is first consulted rather than
/// silently blocking construction paths that never evaluate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSetting {
    /// Latest permitted clock-in time of day.
    AllowClockInOnlyBeforeTime {
        /// `HH:MM` limit, inclusive.
        latest_clock_in_time: String,
    },
    /// Earliest permitted clock-out time of day.
    AllowClockOutOnlyAfterTime {
        /// `HH:MM` limit, inclusive.
        earliest_clock_out_time: String,
    },
}

impl RuleSetting {
    /// Returns the [`RuleType`] this setting belongs to.
    #[must_use]
    pub const fn rule_type(&self) -> RuleType {
        match self {
            Self::AllowClockInOnlyBeforeTime { .. } => RuleType::AllowClockInOnlyBeforeTime,
            Self::AllowClockOutOnlyAfterTime { .. } => RuleType::AllowClockOutOnlyAfterTime,
        }
    }
}

/// A configurable time-of-day constraint on punching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRule {
    id: EntityId,
    targets: Vec<RuleTargetAction>,
    rule_type: RuleType,
    setting: RuleSetting,
    enabled: bool,
}

impl AttendanceRule {
    /// Creates a new rule with a generated id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleTypeMismatch` if `rule_type` does not
    /// match the setting variant.
    pub fn create(
        targets: Vec<RuleTargetAction>,
        rule_type: RuleType,
        setting: RuleSetting,
        enabled: bool,
    ) -> Result<Self, DomainError> {
        Self::validated(EntityId::generate(), targets, rule_type, setting, enabled)
    }

    /// Restores a rule loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleTypeMismatch` if `rule_type` does not
    /// match the setting variant.
    pub fn reconstruct(
        id: EntityId,
        targets: Vec<RuleTargetAction>,
        rule_type: RuleType,
        setting: RuleSetting,
        enabled: bool,
    ) -> Result<Self, DomainError> {
        Self::validated(id, targets, rule_type, setting, enabled)
    }

    fn validated(
        id: EntityId,
        targets: Vec<RuleTargetAction>,
        rule_type: RuleType,
        setting: RuleSetting,
        enabled: bool,
    ) -> Result<Self, DomainError> {
        if rule_type != setting.rule_type() {
            return Err(DomainError::RuleTypeMismatch);
        }
        Ok(Self {
            id,
            targets,
            rule_type,
            setting,
            enabled,
        })
    }

    /// Returns true if the rule is enabled and targets the given action.
    #[must_use]
    pub fn applies_to(&self, action: RuleTargetAction) -> bool {
        self.enabled && self.targets.contains(&action)
    }

    /// Returns the rule's id.
    #[must_use]
    pub const fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the actions the rule targets.
    #[must_use]
    pub fn targets(&self) -> &[RuleTargetAction] {
        &self.targets
    }

    /// Returns the declared rule type.
    #[must_use]
    pub const fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    /// Returns the rule's concrete setting.
    #[must_use]
    pub const fn setting(&self) -> &RuleSetting {
        &self.setting
    }

    /// Returns whether the rule is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}
