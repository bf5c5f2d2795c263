use axum::{extract::State, http::StatusCode};

use loyalty_core::error::AppError;
use loyalty_core::health::check_database;

use crate::state::AppState;

/// Handler for `GET /readyz` — readiness check against the wallet database.
pub async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    check_database(&state.db).await
}
