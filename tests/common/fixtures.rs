//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.

use rbac_admin::services::menu::NewMenu;
use uuid::Uuid;

/// Factory for menu inputs
pub struct MenuFactory;

impl MenuFactory {
    /// An active top-level menu with a unique slug
    pub fn top_level(name: &str) -> NewMenu {
        NewMenu::new(name, unique_slug(name))
    }

    /// A top-level menu at `order`
    pub fn ordered(name: &str, order: i32) -> NewMenu {
        let mut menu = Self::top_level(name);
        menu.sort_order = order;
        menu
    }

    /// An active child of `parent_id` at `order`
    pub fn child(name: &str, parent_id: i32, order: i32) -> NewMenu {
        let mut menu = Self::ordered(name, order);
        menu.parent_id = Some(parent_id);
        menu
    }

    /// An inactive top-level menu
    pub fn inactive(name: &str) -> NewMenu {
        let mut menu = Self::top_level(name);
        menu.is_active = false;
        menu
    }
}

/// Owned role list
pub fn roles(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn unique_slug(name: &str) -> String {
    format!(
        "{}-{}",
        name.to_lowercase().replace([' ', '/'], "-"),
        &Uuid::new_v4().to_string()[..8]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_unique() {
        let a = MenuFactory::top_level("Reports");
        let b = MenuFactory::top_level("Reports");
        assert_ne!(a.slug, b.slug);
        assert!(a.slug.starts_with("reports-"));
    }

    #[test]
    fn test_child_factory() {
        let menu = MenuFactory::child("Reports/Detail", 7, 1);
        assert_eq!(menu.parent_id, Some(7));
        assert_eq!(menu.sort_order, 1);
        assert!(menu.slug.starts_with("reports-detail-"));
    }
}
