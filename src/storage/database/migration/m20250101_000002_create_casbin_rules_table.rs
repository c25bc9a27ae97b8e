use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CasbinRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CasbinRules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CasbinRules::Ptype).string_len(1).not_null())
                    .col(ColumnDef::new(CasbinRules::V0).string().not_null())
                    .col(ColumnDef::new(CasbinRules::V1).string().not_null())
                    .col(
                        ColumnDef::new(CasbinRules::V2)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(CasbinRules::V3).string().null())
                    .col(ColumnDef::new(CasbinRules::V4).string().null())
                    .col(ColumnDef::new(CasbinRules::V5).string().null())
                    .col(
                        ColumnDef::new(CasbinRules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CasbinRules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per rule tuple; `g` rows carry an empty v2
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_casbin_rules_unique")
                    .table(CasbinRules::Table)
                    .col(CasbinRules::Ptype)
                    .col(CasbinRules::V0)
                    .col(CasbinRules::V1)
                    .col(CasbinRules::V2)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Lookups by subject/user
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_casbin_rules_ptype_v0")
                    .table(CasbinRules::Table)
                    .col(CasbinRules::Ptype)
                    .col(CasbinRules::V0)
                    .to_owned(),
            )
            .await?;

        // Enforcement lookups by object/action
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_casbin_rules_ptype_v1_v2")
                    .table(CasbinRules::Table)
                    .col(CasbinRules::Ptype)
                    .col(CasbinRules::V1)
                    .col(CasbinRules::V2)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CasbinRules::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CasbinRules {
    Table,
    Id,
    Ptype,
    V0,
    V1,
    V2,
    V3,
    V4,
    V5,
    CreatedAt,
    UpdatedAt,
}
