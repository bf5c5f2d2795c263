use sea_orm::Database;
use tracing::info;

use loyalty_core::config::Config as _;
use loyalty_core::tracing::init_tracing;
use loyalty_wallet::config::WalletConfig;
use loyalty_wallet::infra::qr::PngQrRenderer;
use loyalty_wallet::router::build_router;
use loyalty_wallet::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = WalletConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        ledger: config.wallet_ledger,
        qr: config.wallet_qr.then_some(PngQrRenderer {
            size: config.wallet_qr_size,
        }),
    };
    info!(
        ledger = state.ledger,
        qr = state.qr.is_some(),
        "wallet features configured"
    );

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.wallet_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("wallet service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
