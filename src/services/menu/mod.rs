//! Role-scoped menu tree
//!
//! Menus form a two-level navigation structure. Visibility is decided by the
//! `menu_roles` association: a caller only sees active menus tied to their
//! role, and a child is only shown under a parent that is itself visible.

mod service;
mod tree;
mod types;


pub use crate::storage::database::{MenuFilter, MenuPatch, NewMenu};
pub use service::MenuService;
pub use tree::{compose_sidebar, compose_tree};
pub use types::{MenuDetail, MenuNode, MenuView, Sidebar, SidebarEntry, SidebarItem};
