pub use sea_orm_migration::prelude::*;

mod m20260305_000001_create_organization_table;
mod m20260305_000002_create_guild_link_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260305_000001_create_organization_table::Migration),
            Box::new(m20260305_000002_create_guild_link_table::Migration),
        ]
    }
}
