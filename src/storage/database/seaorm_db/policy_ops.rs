use crate::auth::rbac::{PermissionEntry, PolicyRule, PolicyStore, PolicyType};
use crate::utils::error::Result;
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;
use tracing::debug;

use super::super::entities::casbin_rule;
use super::types::SeaOrmDatabase;

/// Row filter matching exactly the stored tuple of `rule`
fn rule_condition(rule: &PolicyRule) -> Condition {
    let (v0, v1, v2) = rule.values();
    Condition::all()
        .add(casbin_rule::Column::Ptype.eq(rule.ptype().as_str()))
        .add(casbin_rule::Column::V0.eq(v0))
        .add(casbin_rule::Column::V1.eq(v1))
        .add(casbin_rule::Column::V2.eq(v2.unwrap_or_default()))
}

/// Conflict target of the `(ptype, v0, v1, v2)` unique index
fn rule_tuple_conflict() -> OnConflict {
    OnConflict::columns([
        casbin_rule::Column::Ptype,
        casbin_rule::Column::V0,
        casbin_rule::Column::V1,
        casbin_rule::Column::V2,
    ])
    .do_nothing()
    .to_owned()
}

impl SeaOrmDatabase {
    /// Page through stored rules in id order
    pub async fn list_rules(
        &self,
        ptype: Option<PolicyType>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<casbin_rule::Model>, u64)> {
        let mut query = casbin_rule::Entity::find().order_by_asc(casbin_rule::Column::Id);
        if let Some(ptype) = ptype {
            query = query.filter(casbin_rule::Column::Ptype.eq(ptype.as_str()));
        }

        let paginator = query.paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        debug!("Listed {} of {} rules", rows.len(), total);
        Ok((rows, total))
    }

    /// Find a rule row by id
    pub async fn find_rule(&self, id: i32) -> Result<Option<casbin_rule::Model>> {
        Ok(casbin_rule::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Find the row storing `rule`
    pub async fn find_rule_by_tuple(
        &self,
        rule: &PolicyRule,
    ) -> Result<Option<casbin_rule::Model>> {
        Ok(casbin_rule::Entity::find()
            .filter(rule_condition(rule))
            .order_by_asc(casbin_rule::Column::Id)
            .one(&self.db)
            .await?)
    }
}

#[async_trait]
impl PolicyStore for SeaOrmDatabase {
    async fn insert_rule(&self, rule: &PolicyRule) -> Result<bool> {
        // The unique index decides; a concurrent duplicate inserts nothing
        let inserted = casbin_rule::Entity::insert(casbin_rule::ActiveModel::from_rule(rule))
            .on_conflict(rule_tuple_conflict())
            .exec_without_returning(&self.db)
            .await?;
        Ok(inserted > 0)
    }

    async fn delete_rule(&self, rule: &PolicyRule) -> Result<bool> {
        let result = casbin_rule::Entity::delete_many()
            .filter(rule_condition(rule))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn replace_rule(&self, old: &PolicyRule, new: &PolicyRule) -> Result<bool> {
        let Some(row) = self.find_rule_by_tuple(old).await? else {
            return Ok(false);
        };

        // A single guarded UPDATE: the row keeps its id, and it only applies
        // while the row still holds `old`
        let (v0, v1, v2) = new.values();
        let now: prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let result = casbin_rule::Entity::update_many()
            .col_expr(casbin_rule::Column::Ptype, Expr::value(new.ptype().as_str()))
            .col_expr(casbin_rule::Column::V0, Expr::value(v0))
            .col_expr(casbin_rule::Column::V1, Expr::value(v1))
            .col_expr(casbin_rule::Column::V2, Expr::value(v2.unwrap_or_default()))
            .col_expr(casbin_rule::Column::UpdatedAt, Expr::value(now))
            .filter(casbin_rule::Column::Id.eq(row.id))
            .filter(rule_condition(old))
            .exec(&self.db)
            .await;

        match result {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!("Replacement {} already exists", new);
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn contains_rule(&self, rule: &PolicyRule) -> Result<bool> {
        let count = casbin_rule::Entity::find()
            .filter(rule_condition(rule))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn permissions_for(&self, subject: &str) -> Result<Vec<PermissionEntry>> {
        let rows = casbin_rule::Entity::find()
            .filter(casbin_rule::Column::Ptype.eq(PolicyType::Policy.as_str()))
            .filter(casbin_rule::Column::V0.eq(subject))
            .order_by_asc(casbin_rule::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| PermissionEntry::new(row.v1, row.v2))
            .collect())
    }

    async fn roles_for(&self, user: &str) -> Result<Vec<String>> {
        let rows = casbin_rule::Entity::find()
            .filter(casbin_rule::Column::Ptype.eq(PolicyType::Grouping.as_str()))
            .filter(casbin_rule::Column::V0.eq(user))
            .order_by_asc(casbin_rule::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.v1).collect())
    }

    async fn users_for(&self, role: &str) -> Result<Vec<String>> {
        let rows = casbin_rule::Entity::find()
            .filter(casbin_rule::Column::Ptype.eq(PolicyType::Grouping.as_str()))
            .filter(casbin_rule::Column::V1.eq(role))
            .order_by_asc(casbin_rule::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.v0).collect())
    }

    async fn any_permission(
        &self,
        subjects: &[String],
        object: &str,
        action: &str,
    ) -> Result<bool> {
        if subjects.is_empty() {
            return Ok(false);
        }

        let count = casbin_rule::Entity::find()
            .filter(casbin_rule::Column::Ptype.eq(PolicyType::Policy.as_str()))
            .filter(casbin_rule::Column::V0.is_in(subjects.iter().cloned()))
            .filter(casbin_rule::Column::V1.eq(object))
            .filter(casbin_rule::Column::V2.eq(action))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn count(&self, ptype: PolicyType) -> Result<u64> {
        Ok(casbin_rule::Entity::find()
            .filter(casbin_rule::Column::Ptype.eq(ptype.as_str()))
            .count(&self.db)
            .await?)
    }
}
