//! In-process tree assembly
//!
//! Tree queries fetch the top level and one batch of children; these
//! functions stitch the two result sets together without touching storage.

use super::types::{MenuNode, SidebarEntry, SidebarItem};
use crate::storage::database::entities::menu;
use std::collections::HashMap;

/// Attach each child to its parent in `top`.
///
/// Parent order follows `top`, child order follows `children`. Children whose
/// parent is not in `top` are dropped.
pub fn compose_tree(top: Vec<menu::Model>, children: Vec<menu::Model>) -> Vec<MenuNode> {
    let mut by_parent: HashMap<i32, Vec<menu::Model>> = HashMap::new();
    for child in children {
        if let Some(parent_id) = child.parent_id {
            by_parent.entry(parent_id).or_default().push(child);
        }
    }

    top.into_iter()
        .map(|menu| {
            let children = by_parent.remove(&menu.id).unwrap_or_default();
            MenuNode { menu, children }
        })
        .collect()
}

/// Same as [`compose_tree`], rendered as sidebar entries
pub fn compose_sidebar(top: Vec<menu::Model>, children: Vec<menu::Model>) -> Vec<SidebarEntry> {
    compose_tree(top, children)
        .into_iter()
        .map(|node| SidebarEntry {
            item: SidebarItem::from(node.menu),
            children: node.children.into_iter().map(SidebarItem::from).collect(),
        })
        .collect()
}
