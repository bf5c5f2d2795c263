use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loyalty_auth_types::identity::IdentityHeaders;
use loyalty_core::qr::PngQrRenderer;
use loyalty_domain::amount::CartDiscount;
use loyalty_domain::pagination::PageRequest;

use crate::domain::types::{DiscountToken, HistorySortBy, token_qr_payload};
use crate::error::PointsServiceError;
use crate::state::AppState;
use crate::usecase::checkout::{CheckoutInput, CheckoutUseCase};
use crate::usecase::history::TokenHistoryUseCase;
use crate::usecase::token::{ApplyTokenUseCase, IssueTokenInput, IssueTokenUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TokenResponse {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub value: i32,
    pub remaining_value: i32,
    #[serde(serialize_with = "loyalty_core::serde::to_rfc3339_ms")]
    pub valid_from: DateTime<Utc>,
    #[serde(serialize_with = "loyalty_core::serde::to_rfc3339_ms")]
    pub valid_to: DateTime<Utc>,
    pub active: bool,
}

impl From<DiscountToken> for TokenResponse {
    fn from(token: DiscountToken) -> Self {
        Self {
            id: token.id,
            name: token.name,
            code: token.code,
            value: token.value,
            remaining_value: token.remaining_value,
            valid_from: token.valid_from,
            valid_to: token.valid_to,
            active: token.active,
        }
    }
}

#[derive(Serialize)]
pub struct AppliedTokenResponse {
    pub message: String,
    pub token: TokenResponse,
    /// Base64 PNG of the token id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl AppliedTokenResponse {
    fn new(token: DiscountToken, qr: Option<&PngQrRenderer>) -> anyhow::Result<Self> {
        let qr_code = qr
            .map(|qr| qr.render_base64(&token_qr_payload(token.id)))
            .transpose()?;
        Ok(Self {
            message: format!("Token {} applied", token.code),
            token: token.into(),
            qr_code,
        })
    }
}

#[derive(Serialize)]
pub struct HistoryEntryResponse {
    pub token_id: Uuid,
    pub code: String,
    pub name: String,
    pub original_points: i32,
    pub points_used: i32,
    pub points_remaining: i32,
    #[serde(serialize_with = "loyalty_core::serde::to_rfc3339_ms")]
    pub used_at: DateTime<Utc>,
}

// ── POST /tokens ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueTokenRequest {
    pub name: Option<String>,
    pub code: String,
    pub value: i32,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: DateTime<Utc>,
    pub active: Option<bool>,
}

pub async fn issue_token(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<IssueTokenRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), PointsServiceError> {
    if !identity.is_admin() {
        return Err(PointsServiceError::Forbidden);
    }
    let usecase = IssueTokenUseCase {
        tokens: state.token_repo(),
    };
    let token = usecase
        .execute(IssueTokenInput {
            name: body.name,
            code: body.code,
            value: body.value,
            valid_from: body.valid_from,
            valid_to: body.valid_to,
            active: body.active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(token.into())))
}

// ── POST /tokens/apply ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ApplyTokenRequest {
    pub code: String,
}

pub async fn apply_token(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<ApplyTokenRequest>,
) -> Result<Json<AppliedTokenResponse>, PointsServiceError> {
    let usecase = ApplyTokenUseCase {
        users: state.user_repo(),
        tokens: state.token_repo(),
        usages: state.usage_repo(),
        notifier: state.mailer.clone(),
    };
    let token = usecase
        .execute(identity.user_id, &body.code, Utc::now())
        .await?;
    Ok(Json(AppliedTokenResponse::new(token, state.qr.as_ref())?))
}

// ── POST /tokens/checkout ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub token_id: Option<Uuid>,
    pub cart_total: i32,
}

pub async fn checkout(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CartDiscount>, PointsServiceError> {
    let usecase = CheckoutUseCase {
        tokens: state.token_repo(),
        usages: state.usage_repo(),
        redeemer: state.redeem_port(),
    };
    let result = usecase
        .execute(
            identity.user_id,
            CheckoutInput {
                token_id: body.token_id,
                cart_total: body.cart_total,
            },
        )
        .await?;
    Ok(Json(result))
}

// ── GET /tokens/history ──────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct HistoryQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort_by: Option<String>,
}

pub async fn get_history(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntryResponse>>, PointsServiceError> {
    let sort_by = query
        .sort_by
        .as_deref()
        .and_then(HistorySortBy::from_kebab_case)
        .unwrap_or_default();
    let page = PageRequest::from_query(query.per_page, query.page);

    let usecase = TokenHistoryUseCase {
        usages: state.usage_repo(),
    };
    let entries = usecase.execute(identity.user_id, sort_by, page).await?;
    let items = entries
        .into_iter()
        .map(|entry| HistoryEntryResponse {
            token_id: entry.token.id,
            code: entry.token.code,
            name: entry.token.name,
            original_points: entry.token.value,
            points_used: entry.usage.discount_used,
            points_remaining: entry.token.remaining_value,
            used_at: entry.usage.used_at,
        })
        .collect();
    Ok(Json(items))
}
