pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_reset_challenges;
mod m20260301_000003_create_church_settings;
mod m20260301_000004_create_theme_presets;
mod m20260315_000001_add_church_profile;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_reset_challenges::Migration),
            Box::new(m20260301_000003_create_church_settings::Migration),
            Box::new(m20260301_000004_create_theme_presets::Migration),
            Box::new(m20260315_000001_add_church_profile::Migration),
        ]
    }
}
