use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loyalty_auth_types::identity::IdentityHeaders;
use loyalty_domain::pagination::PageRequest;

use crate::domain::types::BalanceChange;
use crate::error::WalletServiceError;
use crate::state::AppState;
use crate::usecase::credit::{
    ApplyCreditUseCase, IssueCreditLogInput, IssueCreditLogUseCase,
};
use crate::usecase::debit::{DebitInput, DebitUseCase};
use crate::usecase::wallet::{GetWalletUseCase, ListTransactionsUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct WalletResponse {
    pub user_id: Uuid,
    pub balance: Decimal,
    #[serde(serialize_with = "loyalty_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub amount: Decimal,
    pub kind: &'static str,
    pub reason: String,
    #[serde(serialize_with = "loyalty_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct BalanceChangeResponse {
    pub message: String,
    pub amount: Decimal,
    pub balance: Decimal,
}

impl BalanceChangeResponse {
    fn new(message: String, change: BalanceChange) -> Self {
        Self {
            message,
            amount: change.amount,
            balance: change.balance,
        }
    }
}

#[derive(Serialize)]
pub struct CreditLogResponse {
    pub id: Uuid,
    pub code: String,
    pub value: Decimal,
    pub credited_to: Uuid,
    #[serde(serialize_with = "loyalty_core::serde::to_rfc3339_ms")]
    pub expiry: DateTime<Utc>,
}

// ── GET /wallet ──────────────────────────────────────────────────────────────

pub async fn get_wallet(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<WalletResponse>, WalletServiceError> {
    let usecase = GetWalletUseCase {
        wallets: state.wallet_repo(),
        qr: state.qr,
    };
    let view = usecase.execute(identity.user_id).await?;
    Ok(Json(WalletResponse {
        user_id: view.wallet.user_id,
        balance: view.wallet.balance,
        updated_at: view.wallet.updated_at,
        qr_code: view.qr_png_base64,
    }))
}

// ── GET /wallet/transactions ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn get_transactions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<Vec<TransactionResponse>>, WalletServiceError> {
    let usecase = ListTransactionsUseCase {
        ledger: state.ledger_repo(),
    };
    let entries = usecase
        .execute(
            identity.user_id,
            PageRequest::from_query(query.per_page, query.page),
        )
        .await?;
    let items = entries
        .into_iter()
        .map(|entry| TransactionResponse {
            id: entry.id,
            amount: entry.amount,
            kind: entry.kind.as_str(),
            reason: entry.reason,
            created_at: entry.created_at,
        })
        .collect();
    Ok(Json(items))
}

// ── POST /wallet/apply-token ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ApplyTokenRequest {
    pub code: String,
}

pub async fn apply_token(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<ApplyTokenRequest>,
) -> Result<Json<BalanceChangeResponse>, WalletServiceError> {
    let usecase = ApplyCreditUseCase {
        logs: state.credit_log_repo(),
        balances: state.balance_port(),
        ledger: state.ledger,
    };
    let change = usecase
        .execute(identity.user_id, &body.code, Utc::now())
        .await?;
    Ok(Json(BalanceChangeResponse::new(
        format!("{} credited to your wallet", change.amount),
        change,
    )))
}

// ── POST /wallet/debit ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DebitRequest {
    pub amount: Decimal,
    pub reason: Option<String>,
}

pub async fn debit(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<DebitRequest>,
) -> Result<Json<BalanceChangeResponse>, WalletServiceError> {
    let usecase = DebitUseCase {
        wallets: state.wallet_repo(),
        balances: state.balance_port(),
        ledger: state.ledger,
    };
    let change = usecase
        .execute(
            identity.user_id,
            DebitInput {
                amount: body.amount,
                reason: body.reason,
            },
            Utc::now(),
        )
        .await?;
    Ok(Json(BalanceChangeResponse::new(
        format!("{} debited from your wallet", change.amount),
        change,
    )))
}

// ── POST /wallet/credit-logs ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueCreditLogRequest {
    pub user_id: Uuid,
    pub code: String,
    pub value: Decimal,
    pub expiry: DateTime<Utc>,
}

pub async fn issue_credit_log(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<IssueCreditLogRequest>,
) -> Result<(StatusCode, Json<CreditLogResponse>), WalletServiceError> {
    if !identity.is_admin() {
        return Err(WalletServiceError::Forbidden);
    }
    let usecase = IssueCreditLogUseCase {
        users: state.user_repo(),
        logs: state.credit_log_repo(),
    };
    let log = usecase
        .execute(IssueCreditLogInput {
            user_id: body.user_id,
            code: body.code,
            value: body.value,
            expiry: body.expiry,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreditLogResponse {
            id: log.id,
            code: log.code,
            value: log.value,
            credited_to: log.credited_to,
            expiry: log.expiry,
        }),
    ))
}
