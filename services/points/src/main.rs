use sea_orm::Database;
use tracing::info;

use loyalty_core::config::Config as _;
use loyalty_core::qr::PngQrRenderer;
use loyalty_core::tracing::init_tracing;
use loyalty_points::config::PointsConfig;
use loyalty_points::infra::mail::SmtpMailer;
use loyalty_points::router::build_router;
use loyalty_points::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = PointsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::from_config(&config).expect("invalid mail configuration");
    if !mailer.is_enabled() {
        info!("SMTP_HOST not set, expiry notices disabled");
    }

    let state = AppState {
        db,
        mailer,
        qr: config.points_qr.then_some(PngQrRenderer {
            size: config.points_qr_size,
        }),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.points_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("points service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
