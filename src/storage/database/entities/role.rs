use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique role key referenced by identities, rules and menus
    #[sea_orm(unique)]
    pub name: String,

    pub display_name: String,

    pub description: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
