//! Menu service implementation

use super::tree::{compose_sidebar, compose_tree};
use super::types::{MenuDetail, MenuNode, MenuView, Sidebar};
use crate::auth::types::Identity;
use crate::storage::Database;
use crate::storage::database::entities::menu;
use crate::storage::database::{MenuFilter, MenuPatch, NewMenu};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::FieldErrors;
use std::sync::Arc;
use tracing::{debug, info};

/// Menu tree operations over the database
#[derive(Debug, Clone)]
pub struct MenuService {
    db: Arc<Database>,
}

impl MenuService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Parent-less menus tied to `role`, ordered by (order, id)
    pub async fn list_top_level(&self, role: &str, active_only: bool) -> Result<Vec<menu::Model>> {
        self.db.top_level_menus(Some(role), active_only).await
    }

    /// Children of `menu_id` tied to `role`, ordered by (order, id)
    pub async fn children_of(
        &self,
        menu_id: i32,
        role: &str,
        active_only: bool,
    ) -> Result<Vec<menu::Model>> {
        self.db
            .children_of_menus(&[menu_id], Some(role), active_only)
            .await
    }

    /// The two-level sidebar visible to `identity`.
    ///
    /// Fails with [`AdminError::NoRole`] when the identity has no role. A role
    /// without menus yields an empty sidebar.
    pub async fn sidebar_for(&self, identity: &Identity) -> Result<Sidebar> {
        let role = identity.role().ok_or(AdminError::NoRole)?;

        let top = self.db.top_level_menus(Some(role), true).await?;
        let parent_ids: Vec<i32> = top.iter().map(|m| m.id).collect();
        let children = self
            .db
            .children_of_menus(&parent_ids, Some(role), true)
            .await?;

        debug!(
            "Sidebar for role {}: {} top-level, {} children",
            role,
            top.len(),
            children.len()
        );
        Ok(Sidebar {
            user_role: role.to_string(),
            menus: compose_sidebar(top, children),
        })
    }

    /// Active two-level tree, optionally scoped to a role
    pub async fn tree(&self, role: Option<&str>) -> Result<Vec<MenuNode>> {
        let top = self.db.top_level_menus(role, true).await?;
        let parent_ids: Vec<i32> = top.iter().map(|m| m.id).collect();
        let children = self.db.children_of_menus(&parent_ids, role, true).await?;
        Ok(compose_tree(top, children))
    }

    /// Replace the role set of a menu
    pub async fn set_roles(&self, menu_id: i32, roles: &[String]) -> Result<()> {
        self.ensure_roles_exist(roles).await?;
        if !self.db.set_menu_roles(menu_id, roles).await? {
            return Err(AdminError::not_found("Menu not found"));
        }
        Ok(())
    }

    /// Filtered, paginated listing with role names attached
    pub async fn list(
        &self,
        filter: &MenuFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<MenuView>, u64)> {
        let (menus, total) = self.db.list_menus(filter, page, per_page).await?;
        Ok((self.with_roles(menus).await?, total))
    }

    /// One menu with roles, parent and children
    pub async fn get(&self, id: i32) -> Result<MenuDetail> {
        let menu = self
            .db
            .find_menu(id)
            .await?
            .ok_or_else(|| AdminError::not_found("Menu not found"))?;

        let parent = match menu.parent_id {
            Some(parent_id) => self.db.find_menu(parent_id).await?,
            None => None,
        };
        let children = self.db.children_of_menus(&[id], None, false).await?;
        let roles = self
            .db
            .roles_for_menus(&[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        Ok(MenuDetail {
            menu,
            roles,
            parent,
            children,
        })
    }

    /// Create a menu, optionally with its role set
    pub async fn create(&self, new: NewMenu, roles: Option<Vec<String>>) -> Result<MenuView> {
        let mut errors = FieldErrors::new();
        if self.db.slug_taken(&new.slug, None).await? {
            errors.add("slug", "The slug has already been taken");
        }
        if let Some(parent_id) = new.parent_id {
            if self.db.find_menu(parent_id).await?.is_none() {
                errors.add("parent_id", "The selected parent menu does not exist");
            }
        }
        self.collect_missing_roles(roles.as_deref(), &mut errors)
            .await?;
        errors.into_result()?;

        let menu = self.db.create_menu(&new, roles.as_deref()).await?;
        self.view(menu).await
    }

    /// Apply a partial update, optionally replacing the role set
    pub async fn update(
        &self,
        id: i32,
        patch: MenuPatch,
        roles: Option<Vec<String>>,
    ) -> Result<MenuView> {
        if self.db.find_menu(id).await?.is_none() {
            return Err(AdminError::not_found("Menu not found"));
        }

        let mut errors = FieldErrors::new();
        if let Some(slug) = &patch.slug {
            if self.db.slug_taken(slug, Some(id)).await? {
                errors.add("slug", "The slug has already been taken");
            }
        }
        if let Some(Some(parent_id)) = patch.parent_id {
            if parent_id == id {
                errors.add("parent_id", "A menu cannot be its own parent");
            } else if self.db.find_menu(parent_id).await?.is_none() {
                errors.add("parent_id", "The selected parent menu does not exist");
            } else if self.db.ancestor_ids(parent_id).await?.contains(&id) {
                errors.add("parent_id", "A menu cannot be moved under its own descendant");
            }
        }
        self.collect_missing_roles(roles.as_deref(), &mut errors)
            .await?;
        errors.into_result()?;

        let menu = self
            .db
            .update_menu(id, &patch, roles.as_deref())
            .await?
            .ok_or_else(|| AdminError::not_found("Menu not found"))?;
        self.view(menu).await
    }

    /// Delete a menu and its descendants, returning how many were removed
    pub async fn delete(&self, id: i32) -> Result<usize> {
        let removed = self
            .db
            .delete_menu(id)
            .await?
            .ok_or_else(|| AdminError::not_found("Menu not found"))?;
        info!("Deleted {} menus rooted at {}", removed, id);
        Ok(removed)
    }

    async fn ensure_roles_exist(&self, roles: &[String]) -> Result<()> {
        let mut errors = FieldErrors::new();
        self.collect_missing_roles(Some(roles), &mut errors).await?;
        errors.into_result()
    }

    async fn collect_missing_roles(
        &self,
        roles: Option<&[String]>,
        errors: &mut FieldErrors,
    ) -> Result<()> {
        let Some(roles) = roles else {
            return Ok(());
        };
        for name in self.db.missing_roles(roles).await? {
            errors.add("roles", format!("The selected role {} is invalid", name));
        }
        Ok(())
    }

    async fn view(&self, menu: menu::Model) -> Result<MenuView> {
        let roles = self
            .db
            .roles_for_menus(&[menu.id])
            .await?
            .remove(&menu.id)
            .unwrap_or_default();
        Ok(MenuView { menu, roles })
    }

    async fn with_roles(&self, menus: Vec<menu::Model>) -> Result<Vec<MenuView>> {
        let ids: Vec<i32> = menus.iter().map(|m| m.id).collect();
        let mut roles = self.db.roles_for_menus(&ids).await?;
        Ok(menus
            .into_iter()
            .map(|menu| MenuView {
                roles: roles.remove(&menu.id).unwrap_or_default(),
                menu,
            })
            .collect())
    }
}
