use crate::utils::error::Result;
use sea_orm::sea_query::{Query, SimpleExpr};
use sea_orm::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

use super::super::entities::{menu, menu_role};
use super::types::{MenuFilter, MenuPatch, NewMenu, SeaOrmDatabase};

/// Menus associated with `role`
fn role_scope(role: &str) -> SimpleExpr {
    menu::Column::Id.in_subquery(
        Query::select()
            .column(menu_role::Column::MenuId)
            .from(menu_role::Entity)
            .and_where(menu_role::Column::RoleName.eq(role))
            .to_owned(),
    )
}

/// Shared scoping for tree queries
fn scoped(
    query: Select<menu::Entity>,
    role: Option<&str>,
    active_only: bool,
) -> Select<menu::Entity> {
    let mut query = query;
    if active_only {
        query = query.filter(menu::Column::IsActive.eq(true));
    }
    if let Some(role) = role {
        query = query.filter(role_scope(role));
    }
    query
        .order_by_asc(menu::Column::SortOrder)
        .order_by_asc(menu::Column::Id)
}

/// Swap the association set of `menu_id` for `roles`
async fn replace_roles<C: ConnectionTrait>(conn: &C, menu_id: i32, roles: &[String]) -> Result<()> {
    menu_role::Entity::delete_many()
        .filter(menu_role::Column::MenuId.eq(menu_id))
        .exec(conn)
        .await?;

    let names: BTreeSet<&str> = roles.iter().map(String::as_str).collect();
    if names.is_empty() {
        return Ok(());
    }

    let now: prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
    let rows = names.into_iter().map(|name| menu_role::ActiveModel {
        menu_id: Set(menu_id),
        role_name: Set(name.to_string()),
        created_at: Set(now),
        ..Default::default()
    });
    menu_role::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

impl SeaOrmDatabase {
    /// Find a menu by id
    pub async fn find_menu(&self, id: i32) -> Result<Option<menu::Model>> {
        Ok(menu::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Page through menus matching `filter`, ordered by (order, id)
    pub async fn list_menus(
        &self,
        filter: &MenuFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<menu::Model>, u64)> {
        let mut query = menu::Entity::find();
        if let Some(active) = filter.is_active {
            query = query.filter(menu::Column::IsActive.eq(active));
        }
        if filter.parent_only {
            query = query.filter(menu::Column::ParentId.is_null());
        }
        let query = scoped(query, filter.role.as_deref(), false);

        let paginator = query.paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        debug!("Listed {} of {} menus", rows.len(), total);
        Ok((rows, total))
    }

    /// Parent-less menus, optionally scoped to a role and to active entries
    pub async fn top_level_menus(
        &self,
        role: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<menu::Model>> {
        let query = menu::Entity::find().filter(menu::Column::ParentId.is_null());
        Ok(scoped(query, role, active_only).all(&self.db).await?)
    }

    /// Children of every menu in `parent_ids`, fetched in one query
    pub async fn children_of_menus(
        &self,
        parent_ids: &[i32],
        role: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<menu::Model>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query =
            menu::Entity::find().filter(menu::Column::ParentId.is_in(parent_ids.iter().copied()));
        Ok(scoped(query, role, active_only).all(&self.db).await?)
    }

    /// Associated role names per menu, each list sorted
    pub async fn roles_for_menus(&self, menu_ids: &[i32]) -> Result<HashMap<i32, Vec<String>>> {
        let mut roles: HashMap<i32, Vec<String>> = HashMap::new();
        if menu_ids.is_empty() {
            return Ok(roles);
        }

        let rows = menu_role::Entity::find()
            .filter(menu_role::Column::MenuId.is_in(menu_ids.iter().copied()))
            .order_by_asc(menu_role::Column::RoleName)
            .all(&self.db)
            .await?;

        for row in rows {
            roles.entry(row.menu_id).or_default().push(row.role_name);
        }
        Ok(roles)
    }

    /// Whether another menu already uses `slug`
    pub async fn slug_taken(&self, slug: &str, except: Option<i32>) -> Result<bool> {
        let mut query = menu::Entity::find().filter(menu::Column::Slug.eq(slug));
        if let Some(id) = except {
            query = query.filter(menu::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    /// `start` followed by its ancestors, nearest first. Stops at a repeated id.
    pub async fn ancestor_ids(&self, start: i32) -> Result<Vec<i32>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(start);

        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            chain.push(id);
            current = self.find_menu(id).await?.and_then(|m| m.parent_id);
        }
        Ok(chain)
    }

    /// Insert a menu and, when given, its role associations in one transaction
    pub async fn create_menu(
        &self,
        new: &NewMenu,
        roles: Option<&[String]>,
    ) -> Result<menu::Model> {
        let txn = self.db.begin().await?;
        let now: prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let model = menu::ActiveModel {
            name: Set(new.name.clone()),
            slug: Set(new.slug.clone()),
            icon: Set(new.icon.clone()),
            url: Set(new.url.clone()),
            sort_order: Set(new.sort_order),
            is_active: Set(new.is_active),
            parent_id: Set(new.parent_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if let Some(roles) = roles {
            replace_roles(&txn, model.id, roles).await?;
        }

        txn.commit().await?;
        info!("Menu created: {} ({})", model.slug, model.id);
        Ok(model)
    }

    /// Apply `patch` and, when given, replace role associations in one
    /// transaction. `None` when the menu does not exist.
    pub async fn update_menu(
        &self,
        id: i32,
        patch: &MenuPatch,
        roles: Option<&[String]>,
    ) -> Result<Option<menu::Model>> {
        let txn = self.db.begin().await?;

        let Some(existing) = menu::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: menu::ActiveModel = existing.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(slug) = &patch.slug {
            active.slug = Set(slug.clone());
        }
        if let Some(icon) = &patch.icon {
            active.icon = Set(icon.clone());
        }
        if let Some(url) = &patch.url {
            active.url = Set(url.clone());
        }
        if let Some(order) = patch.sort_order {
            active.sort_order = Set(order);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(parent_id) = patch.parent_id {
            active.parent_id = Set(parent_id);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        let model = active.update(&txn).await?;

        if let Some(roles) = roles {
            replace_roles(&txn, id, roles).await?;
        }

        txn.commit().await?;
        info!("Menu updated: {} ({})", model.slug, model.id);
        Ok(Some(model))
    }

    /// Replace the role associations of a menu; `false` when it does not exist
    pub async fn set_menu_roles(&self, id: i32, roles: &[String]) -> Result<bool> {
        let txn = self.db.begin().await?;

        if menu::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }
        replace_roles(&txn, id, roles).await?;

        txn.commit().await?;
        info!("Menu {} roles replaced: {:?}", id, roles);
        Ok(true)
    }

    /// Delete a menu with all of its descendants and their associations.
    /// Returns the number of menus removed, `None` when it does not exist.
    pub async fn delete_menu(&self, id: i32) -> Result<Option<usize>> {
        let txn = self.db.begin().await?;

        if menu::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(None);
        }

        let mut doomed = vec![id];
        let mut frontier = vec![id];
        while !frontier.is_empty() {
            let children: Vec<i32> = menu::Entity::find()
                .filter(menu::Column::ParentId.is_in(frontier.iter().copied()))
                .all(&txn)
                .await?
                .into_iter()
                .map(|m| m.id)
                .filter(|child| !doomed.contains(child))
                .collect();
            doomed.extend(&children);
            frontier = children;
        }

        menu_role::Entity::delete_many()
            .filter(menu_role::Column::MenuId.is_in(doomed.iter().copied()))
            .exec(&txn)
            .await?;
        // Leaves first so the parent foreign key is never left dangling
        for menu_id in doomed.iter().rev() {
            menu::Entity::delete_by_id(*menu_id).exec(&txn).await?;
        }

        txn.commit().await?;
        info!("Menu {} deleted with {} descendants", id, doomed.len() - 1);
        Ok(Some(doomed.len()))
    }
}
