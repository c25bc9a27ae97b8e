//! Policy store abstraction

use super::types::{PermissionEntry, PolicyRule, PolicyType};
use crate::utils::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Durable table of policy and grouping rules
///
/// Implementations must make every mutation visible to subsequent reads
/// before returning, and `replace_rule` must be all-or-nothing.
#[async_trait]
pub trait PolicyStore: Send + Sync + std::fmt::Debug {
    /// Insert unless an identical rule exists; `false` means no-op
    async fn insert_rule(&self, rule: &PolicyRule) -> Result<bool>;

    /// Delete a matching rule; `false` when nothing matched
    async fn delete_rule(&self, rule: &PolicyRule) -> Result<bool>;

    /// Swap `old` for `new` atomically; `false` (nothing changed) when `old`
    /// is absent or `new` already exists
    async fn replace_rule(&self, old: &PolicyRule, new: &PolicyRule) -> Result<bool>;

    async fn contains_rule(&self, rule: &PolicyRule) -> Result<bool>;

    /// Direct `p` rules whose subject is `subject`
    async fn permissions_for(&self, subject: &str) -> Result<Vec<PermissionEntry>>;

    /// Direct `g` rules for `user`
    async fn roles_for(&self, user: &str) -> Result<Vec<String>>;

    /// Users directly grouped into `role`
    async fn users_for(&self, role: &str) -> Result<Vec<String>>;

    /// Whether any of `subjects` holds `(object, action)`
    async fn any_permission(&self, subjects: &[String], object: &str, action: &str)
    -> Result<bool>;

    async fn count(&self, ptype: PolicyType) -> Result<u64>;
}

/// In-process store, used by tests and for ephemeral setups
#[derive(Debug, Default)]
pub struct MemoryPolicyStore {
    rules: RwLock<Vec<PolicyRule>>,
}

impl MemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every rule in insertion order
    pub fn rules(&self) -> Vec<PolicyRule> {
        self.rules.read().clone()
    }
}

#[async_trait]
impl PolicyStore for MemoryPolicyStore {
    async fn insert_rule(&self, rule: &PolicyRule) -> Result<bool> {
        let mut rules = self.rules.write();
        if rules.contains(rule) {
            return Ok(false);
        }
        rules.push(rule.clone());
        Ok(true)
    }

    async fn delete_rule(&self, rule: &PolicyRule) -> Result<bool> {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|r| r != rule);
        Ok(rules.len() != before)
    }

    async fn replace_rule(&self, old: &PolicyRule, new: &PolicyRule) -> Result<bool> {
        let mut rules = self.rules.write();
        let Some(pos) = rules.iter().position(|r| r == old) else {
            return Ok(false);
        };
        if old != new && rules.contains(new) {
            return Ok(false);
        }
        rules[pos] = new.clone();
        Ok(true)
    }

    async fn contains_rule(&self, rule: &PolicyRule) -> Result<bool> {
        Ok(self.rules.read().contains(rule))
    }

    async fn permissions_for(&self, subject: &str) -> Result<Vec<PermissionEntry>> {
        Ok(self
            .rules
            .read()
            .iter()
            .filter_map(|r| match r {
                PolicyRule::Permission {
                    subject: s,
                    object,
                    action,
                } if s == subject => Some(PermissionEntry::new(object, action)),
                _ => None,
            })
            .collect())
    }

    async fn roles_for(&self, user: &str) -> Result<Vec<String>> {
        Ok(self
            .rules
            .read()
            .iter()
            .filter_map(|r| match r {
                PolicyRule::Grouping { user: u, role } if u == user => Some(role.clone()),
                _ => None,
            })
            .collect())
    }

    async fn users_for(&self, role: &str) -> Result<Vec<String>> {
        Ok(self
            .rules
            .read()
            .iter()
            .filter_map(|r| match r {
                PolicyRule::Grouping { user, role: r } if r == role => Some(user.clone()),
                _ => None,
            })
            .collect())
    }

    async fn any_permission(
        &self,
        subjects: &[String],
        object: &str,
        action: &str,
    ) -> Result<bool> {
        Ok(self.rules.read().iter().any(|r| match r {
            PolicyRule::Permission {
                subject,
                object: o,
                action: a,
            } => o == object && a == action && subjects.contains(subject),
            PolicyRule::Grouping { .. } => false,
        }))
    }

    async fn count(&self, ptype: PolicyType) -> Result<u64> {
        Ok(self
            .rules
            .read()
            .iter()
            .filter(|r| r.ptype() == ptype)
            .count() as u64)
    }
}
