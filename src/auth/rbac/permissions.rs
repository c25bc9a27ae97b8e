//! Policy (`p`) rule management

use super::system::Enforcer;
use super::types::{PermissionEntry, PolicyRule};
use crate::utils::error::Result;
use std::collections::BTreeSet;
use tracing::info;

impl Enforcer {
    /// Grant `action` on `object` to `subject`; `false` if already granted
    pub async fn add_policy(&self, subject: &str, object: &str, action: &str) -> Result<bool> {
        self.add_rule(&PolicyRule::permission(subject, object, action))
            .await
    }

    /// Revoke a grant; `false` if it did not exist
    pub async fn remove_policy(&self, subject: &str, object: &str, action: &str) -> Result<bool> {
        self.remove_rule(&PolicyRule::permission(subject, object, action))
            .await
    }

    pub async fn has_policy(&self, subject: &str, object: &str, action: &str) -> Result<bool> {
        self.store
            .contains_rule(&PolicyRule::permission(subject, object, action))
            .await
    }

    /// Insert any rule kind
    pub async fn add_rule(&self, rule: &PolicyRule) -> Result<bool> {
        rule.validate()?;
        let added = self.store.insert_rule(rule).await?;
        if added {
            info!("Rule added: {}", rule);
        }
        Ok(added)
    }

    /// Remove any rule kind
    pub async fn remove_rule(&self, rule: &PolicyRule) -> Result<bool> {
        rule.validate()?;
        let removed = self.store.delete_rule(rule).await?;
        if removed {
            info!("Rule removed: {}", rule);
        }
        Ok(removed)
    }

    /// Replace `old` with `new` in one guarded store update.
    ///
    /// Returns `false` and changes nothing when `old` is absent or `new`
    /// already exists.
    pub async fn replace_policy(&self, old: &PolicyRule, new: &PolicyRule) -> Result<bool> {
        old.validate()?;
        new.validate()?;
        let replaced = self.store.replace_rule(old, new).await?;
        if replaced {
            info!("Rule replaced: [{}] -> [{}]", old, new);
        }
        Ok(replaced)
    }

    /// Direct grants of `subject`
    pub async fn get_permissions_for_user(&self, subject: &str) -> Result<Vec<PermissionEntry>> {
        self.store.permissions_for(subject).await
    }

    /// Grants of `subject` and of every role it reaches, deduplicated
    pub async fn get_implicit_permissions_for_user(
        &self,
        subject: &str,
    ) -> Result<Vec<PermissionEntry>> {
        let mut entries = BTreeSet::new();
        for s in self.subject_closure(subject).await? {
            entries.extend(self.store.permissions_for(&s).await?);
        }
        Ok(entries.into_iter().collect())
    }
}
