//! Menu view types

use crate::storage::database::entities::menu;
use serde::Serialize;

/// A menu as rendered in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub url: Option<String>,
    pub order: i32,
}

impl From<menu::Model> for SidebarItem {
    fn from(m: menu::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            icon: m.icon,
            url: m.url,
            order: m.sort_order,
        }
    }
}

/// A top-level sidebar entry with its visible children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    #[serde(flatten)]
    pub item: SidebarItem,
    pub children: Vec<SidebarItem>,
}

/// The sidebar of one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub user_role: String,
    pub menus: Vec<SidebarEntry>,
}

/// A top-level menu with its children, as returned by the tree listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    #[serde(flatten)]
    pub menu: menu::Model,
    pub children: Vec<menu::Model>,
}

/// A menu with its associated role names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    #[serde(flatten)]
    pub menu: menu::Model,
    pub roles: Vec<String>,
}

/// A single menu with its roles, parent and direct children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuDetail {
    #[serde(flatten)]
    pub menu: menu::Model,
    pub roles: Vec<String>,
    pub parent: Option<menu::Model>,
    pub children: Vec<menu::Model>,
}
