use crate::auth::rbac::PolicyRule;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored policy rule, one row per `p` or `g` tuple
///
/// `g` rows store an empty `v2` so one unique index covers both kinds.
/// `v3..v5` exist for schema compatibility and are never written.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "casbin_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// `p` or `g`
    pub ptype: String,

    pub v0: String,

    pub v1: String,

    pub v2: String,

    pub v3: Option<String>,

    pub v4: Option<String>,

    pub v5: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Typed view of this row
    pub fn to_rule(&self) -> crate::utils::error::Result<PolicyRule> {
        PolicyRule::from_columns(&self.ptype, &self.v0, &self.v1, Some(self.v2.as_str()))
    }
}

impl ActiveModel {
    /// New row for `rule`, timestamps set to now
    pub fn from_rule(rule: &PolicyRule) -> Self {
        let (v0, v1, v2) = rule.values();
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        Self {
            ptype: Set(rule.ptype().as_str().to_string()),
            v0: Set(v0.to_string()),
            v1: Set(v1.to_string()),
            v2: Set(v2.unwrap_or_default().to_string()),
            v3: Set(None),
            v4: Set(None),
            v5: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}
