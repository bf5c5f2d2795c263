use anyhow::Context as _;
use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

use crate::error::AppError;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness check: the service is ready once its database answers a ping.
pub async fn check_database(db: &DatabaseConnection) -> Result<StatusCode, AppError> {
    db.ping().await.context("database ping")?;
    Ok(StatusCode::OK)
}
