use crate::utils::error::Result;
use sea_orm::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::super::entities::role;
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// All roles in id order
    pub async fn list_roles(&self) -> Result<Vec<role::Model>> {
        let roles = role::Entity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;
        debug!("Listed {} roles", roles.len());
        Ok(roles)
    }

    /// Find a role by its unique name
    pub async fn find_role_by_name(&self, name: &str) -> Result<Option<role::Model>> {
        Ok(role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    /// The subset of `names` with no matching role, sorted and deduplicated
    pub async fn missing_roles(&self, names: &[String]) -> Result<Vec<String>> {
        let wanted: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let found: BTreeSet<String> = role::Entity::find()
            .filter(role::Column::Name.is_in(wanted.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|r| r.name)
            .collect();

        Ok(wanted
            .into_iter()
            .filter(|name| !found.contains(*name))
            .map(str::to_string)
            .collect())
    }

    /// Create the role or refresh its display fields
    pub async fn upsert_role(
        &self,
        name: &str,
        display_name: &str,
        description: Option<&str>,
    ) -> Result<role::Model> {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        match self.find_role_by_name(name).await? {
            Some(existing) => {
                let mut active: role::ActiveModel = existing.into();
                active.display_name = Set(display_name.to_string());
                active.description = Set(description.map(str::to_string));
                active.updated_at = Set(now);
                let model = active.update(&self.db).await?;
                debug!("Role refreshed: {}", name);
                Ok(model)
            }
            None => {
                let model = role::ActiveModel {
                    name: Set(name.to_string()),
                    display_name: Set(display_name.to_string()),
                    description: Set(description.map(str::to_string)),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
                info!("Role created: {}", name);
                Ok(model)
            }
        }
    }
}
