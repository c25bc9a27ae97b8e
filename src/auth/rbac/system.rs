//! RBAC enforcer core functionality

use super::store::PolicyStore;
use super::types::PolicyType;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of `g` hops followed when resolving a subject's roles
pub const MAX_ROLE_DEPTH: usize = 10;

/// Policy engine over a [`PolicyStore`]
#[derive(Debug, Clone)]
pub struct Enforcer {
    pub(super) store: Arc<dyn PolicyStore>,
}

impl Enforcer {
    /// Create an enforcer backed by `store`
    pub fn new(store: Arc<dyn PolicyStore>) -> Self {
        Self { store }
    }

    /// Create an enforcer and report what the store currently holds
    pub async fn load(store: Arc<dyn PolicyStore>) -> Result<Self> {
        let enforcer = Self::new(store);
        let policies = enforcer.store.count(PolicyType::Policy).await?;
        let groupings = enforcer.store.count(PolicyType::Grouping).await?;
        info!(
            "Policy engine ready: {} policy rules, {} grouping rules",
            policies, groupings
        );
        Ok(enforcer)
    }

    /// Whether `subject`, directly or through its roles, may perform
    /// `action` on `object`.
    ///
    /// Matching is exact. Blank input is denied.
    pub async fn enforce(&self, subject: &str, object: &str, action: &str) -> Result<bool> {
        if subject.trim().is_empty() || object.trim().is_empty() || action.trim().is_empty() {
            return Ok(false);
        }

        let subjects = self.subject_closure(subject).await?;
        let allowed = self.store.any_permission(&subjects, object, action).await?;

        debug!(
            "enforce({}, {}, {}) -> {}",
            subject, object, action, allowed
        );
        Ok(allowed)
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn PolicyStore> {
        &self.store
    }
}
