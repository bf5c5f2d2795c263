pub use sea_orm_migration::prelude::*;

mod m20260415_000001_create_users;
mod m20260415_000002_create_wallets;
mod m20260415_000003_create_token_credit_logs;
mod m20260415_000004_create_wallet_transactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260415_000001_create_users::Migration),
            Box::new(m20260415_000002_create_wallets::Migration),
            Box::new(m20260415_000003_create_token_credit_logs::Migration),
            Box::new(m20260415_000004_create_wallet_transactions::Migration),
        ]
    }
}
