pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_table;
mod m20251015_000001_add_season_episode_number;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_table::Migration),
            Box::new(m20251015_000001_add_season_episode_number::Migration),
        ]
    }
}
