pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_publisher_table;
mod m20251101_000002_create_user_table;
mod m20251101_000003_create_article_table;
mod m20251101_000004_create_subscription_tables;
mod m20251120_000005_create_password_reset_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_publisher_table::Migration),
            Box::new(m20251101_000002_create_user_table::Migration),
            Box::new(m20251101_000003_create_article_table::Migration),
            Box::new(m20251101_000004_create_subscription_tables::Migration),
            Box::new(m20251120_000005_create_password_reset_table::Migration),
        ]
    }
}

pub use sea_orm_migration::MigrationStatus;
