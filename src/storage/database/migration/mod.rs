use sea_orm_migration::prelude::*;

mod m20250101_000001_create_roles_table;
mod m20250101_000002_create_casbin_rules_table;
mod m20250101_000003_create_menus_table;
mod m20250101_000004_create_menu_roles_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_roles_table::Migration),
            Box::new(m20250101_000002_create_casbin_rules_table::Migration),
            Box::new(m20250101_000003_create_menus_table::Migration),
            Box::new(m20250101_000004_create_menu_roles_table::Migration),
        ]
    }
}
