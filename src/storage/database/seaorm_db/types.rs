use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// SeaORM-based database implementation
#[derive(Debug, Clone)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

/// Filters accepted by the menu listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// Restrict to active (`Some(true)`) or inactive (`Some(false)`) menus
    pub is_active: Option<bool>,
    /// Only parent-less menus
    pub parent_only: bool,
    /// Only menus associated with this role
    pub role: Option<String>,
}

/// Fields of a menu to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenu {
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub parent_id: Option<i32>,
}

impl NewMenu {
    /// A top-level, active menu at position 0
    pub fn new<N: Into<String>, S: Into<String>>(name: N, slug: S) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            icon: None,
            url: None,
            sort_order: 0,
            is_active: true,
            parent_id: None,
        }
    }
}

/// Partial menu update; `None` leaves a field untouched and the inner
/// `None` of a nullable field clears it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub icon: Option<Option<String>>,
    pub url: Option<Option<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub parent_id: Option<Option<i32>>,
}
