// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::lock_store;
use async_trait::async_trait;
use kintai_domain::{AttendanceRule, AttendanceRuleRepository, EntityId, RepositoryError};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::debug;

/// In-memory store for attendance rules.
///
/// Rules have no event log and no delta contract; create/update/delete
/// replace whole values. Keys are ordered so `find_all_enabled` returns a
/// stable order.
#[derive(Debug, Default)]
pub struct MemoryAttendanceRuleRepository {
    rows: Mutex<BTreeMap<String, AttendanceRule>>,
}

impl MemoryAttendanceRuleRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceRuleRepository for MemoryAttendanceRuleRepository {
    async fn find_by_id(
        &self,
        rule_id: &EntityId,
    ) -> Result<Option<AttendanceRule>, RepositoryError> {
        let rows = lock_store(&self.rows)?;
        Ok(rows.get(rule_id.value()).cloned())
    }

    async fn find_all_enabled(&self) -> Result<Vec<AttendanceRule>, RepositoryError> {
        let rows = lock_store(&self.rows)?;
        let enabled: Vec<AttendanceRule> = rows
            .values()
            .filter(|rule| rule.is_enabled())
            .cloned()
            .collect();
        debug!(count = enabled.len(), "enabled rules loaded");
        Ok(enabled)
    }

    async fn create(&self, rule: &AttendanceRule) -> Result<(), RepositoryError> {
        let mut rows = lock_store(&self.rows)?;
        if rows.contains_key(rule.id().value()) {
            return Err(RepositoryError::Storage(format!(
                "rule already exists: {}",
                rule.id()
            )));
        }
        rows.insert(rule.id().value().to_string(), rule.clone());
        debug!(rule_id = %rule.id(), "rule created");
        Ok(())
    }

    async fn update(&self, rule: &AttendanceRule) -> Result<(), RepositoryError> {
        let mut rows = lock_store(&self.rows)?;
        if !rows.contains_key(rule.id().value()) {
            return Err(RepositoryError::Storage(format!(
                "rule does not exist: {}",
                rule.id()
            )));
        }
        rows.insert(rule.id().value().to_string(), rule.clone());
        debug!(rule_id = %rule.id(), "rule updated");
        Ok(())
    }

    async fn delete(&self, rule: &AttendanceRule) -> Result<(), RepositoryError> {
        let mut rows = lock_store(&self.rows)?;
        if rows.remove(rule.id().value()).is_none() {
            return Err(RepositoryError::Storage(format!(
                "rule does not exist: {}",
                rule.id()
            )));
        }
        debug!(rule_id = %rule.id(), "rule deleted");
        Ok(())
    }
}
