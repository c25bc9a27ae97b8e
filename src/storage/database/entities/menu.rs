use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Navigation menu database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub icon: Option<String>,

    pub url: Option<String>,

    /// Display position among siblings, ties broken by id
    #[serde(rename = "order")]
    pub sort_order: i32,

    pub is_active: bool,

    /// Parent menu, `None` for top-level entries
    pub parent_id: Option<i32>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
    #[sea_orm(has_many = "super::menu_role::Entity")]
    MenuRoles,
}

impl Related<super::menu_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
