use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(loyalty_points_migration::Migrator).await;
}
