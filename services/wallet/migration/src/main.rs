use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(loyalty_wallet_migration::Migrator).await;
}
