use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MenuRoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuRoles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MenuRoles::MenuId).integer().not_null())
                    .col(ColumnDef::new(MenuRoles::RoleName).string().not_null())
                    .col(
                        ColumnDef::new(MenuRoles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_roles_menu_id")
                            .from(MenuRoles::Table, MenuRoles::MenuId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_roles_role_name")
                            .from(MenuRoles::Table, MenuRoles::RoleName)
                            .to(Roles::Table, Roles::Name)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_menu_roles_menu_role")
                    .table(MenuRoles::Table)
                    .col(MenuRoles::MenuId)
                    .col(MenuRoles::RoleName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_menu_roles_role_name")
                    .table(MenuRoles::Table)
                    .col(MenuRoles::RoleName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuRoles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MenuRoles {
    Table,
    Id,
    MenuId,
    RoleName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Menus {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Name,
}
