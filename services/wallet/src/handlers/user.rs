use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loyalty_auth_types::identity::IdentityHeaders;

use crate::error::WalletServiceError;
use crate::state::AppState;
use crate::usecase::user::{CreateUserInput, CreateUserUseCase};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub id: Option<Uuid>,
    pub username: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct CreatedUserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub balance: Decimal,
    #[serde(serialize_with = "loyalty_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), WalletServiceError> {
    if !identity.is_admin() {
        return Err(WalletServiceError::Forbidden);
    }
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let (user, wallet) = usecase
        .execute(CreateUserInput {
            id: body.id,
            username: body.username,
            email: body.email,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            balance: loyalty_domain::amount::to_money(wallet.balance),
            created_at: user.created_at,
        }),
    ))
}
