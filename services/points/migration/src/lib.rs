pub use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_discount_tokens;
mod m20260401_000003_create_token_usages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_discount_tokens::Migration),
            Box::new(m20260401_000003_create_token_usages::Migration),
        ]
    }
}
