use sea_orm_migration::prelude::*;

mod m20261016_000001_create_users;
mod m20261016_000002_create_otps;
mod m20261016_000003_create_persons;
mod m20261016_000004_create_tags;
mod m20261016_000005_create_relationships;
mod m20261016_000006_create_phones;
mod m20261016_000007_create_important_dates;
mod m20261016_000008_create_persons_tags;
mod m20261016_000009_create_persons_relationships;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_users::Migration),
            Box::new(m20261016_000002_create_otps::Migration),
            Box::new(m20261016_000003_create_persons::Migration),
            Box::new(m20261016_000004_create_tags::Migration),
            Box::new(m20261016_000005_create_relationships::Migration),
            Box::new(m20261016_000006_create_phones::Migration),
            Box::new(m20261016_000007_create_important_dates::Migration),
            Box::new(m20261016_000008_create_persons_tags::Migration),
            Box::new(m20261016_000009_create_persons_relationships::Migration),
        ]
    }
}
