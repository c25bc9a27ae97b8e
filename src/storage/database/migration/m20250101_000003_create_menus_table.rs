use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Menus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Menus::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Menus::Name).string().not_null())
                    .col(ColumnDef::new(Menus::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Menus::Icon).string().null())
                    .col(ColumnDef::new(Menus::Url).string().null())
                    .col(
                        ColumnDef::new(Menus::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Menus::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Menus::ParentId).integer().null())
                    .col(
                        ColumnDef::new(Menus::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Menus::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menus_parent_id")
                            .from(Menus::Table, Menus::ParentId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_menus_parent_order")
                    .table(Menus::Table)
                    .col(Menus::ParentId)
                    .col(Menus::SortOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Menus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Menus {
    Table,
    Id,
    Name,
    Slug,
    Icon,
    Url,
    SortOrder,
    IsActive,
    ParentId,
    CreatedAt,
    UpdatedAt,
}
