//! Grouping (`g`) rule management

use super::system::{Enforcer, MAX_ROLE_DEPTH};
use super::types::PolicyRule;
use crate::utils::error::Result;
use std::collections::{HashSet, VecDeque};
use tracing::warn;

impl Enforcer {
    /// Place `user` in `role`; `false` if already a member
    pub async fn add_role_for_user(&self, user: &str, role: &str) -> Result<bool> {
        self.add_rule(&PolicyRule::grouping(user, role)).await
    }

    /// Remove `user` from `role`; `false` if not a member
    pub async fn delete_role_for_user(&self, user: &str, role: &str) -> Result<bool> {
        self.remove_rule(&PolicyRule::grouping(user, role)).await
    }

    /// Direct roles of `user`
    pub async fn get_roles_for_user(&self, user: &str) -> Result<Vec<String>> {
        self.store.roles_for(user).await
    }

    /// Direct members of `role`
    pub async fn get_users_for_role(&self, role: &str) -> Result<Vec<String>> {
        self.store.users_for(role).await
    }

    /// Whether `user` reaches `role` through any chain of groupings
    pub async fn has_role_for_user(&self, user: &str, role: &str) -> Result<bool> {
        Ok(self
            .get_implicit_roles_for_user(user)
            .await?
            .iter()
            .any(|r| r == role))
    }

    /// Every role reachable from `user`, nearest first
    pub async fn get_implicit_roles_for_user(&self, user: &str) -> Result<Vec<String>> {
        let mut closure = self.subject_closure(user).await?;
        closure.remove(0);
        Ok(closure)
    }

    /// `subject` followed by every role it reaches within
    /// [`MAX_ROLE_DEPTH`] hops. Cycles are visited once.
    pub(super) async fn subject_closure(&self, subject: &str) -> Result<Vec<String>> {
        let mut visited: HashSet<String> = HashSet::from([subject.to_string()]);
        let mut ordered = vec![subject.to_string()];
        let mut queue = VecDeque::from([(subject.to_string(), 0usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            let roles = self.store.roles_for(&current).await?;
            if depth >= MAX_ROLE_DEPTH {
                if roles.iter().any(|r| !visited.contains(r)) {
                    warn!(
                        "Role chain from {} exceeds {} levels, truncating",
                        subject, MAX_ROLE_DEPTH
                    );
                }
                continue;
            }
            for role in roles {
                if visited.insert(role.clone()) {
                    ordered.push(role.clone());
                    queue.push_back((role, depth + 1));
                }
            }
        }

        Ok(ordered)
    }
}
