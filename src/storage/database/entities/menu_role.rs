use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu to role association
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub menu_id: i32,

    pub role_name: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::menu::Entity",
        from = "Column::MenuId",
        to = "super::menu::Column::Id",
        on_delete = "Cascade"
    )]
    Menu,
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleName",
        to = "super::role::Column::Name",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::menu::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
