use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use loyalty_domain::amount::{is_valid_money, to_money};

use crate::domain::repository::{BalancePort, CreditLogRepository, UserRepository};
use crate::domain::types::{BalanceChange, CreditLog, LedgerEntry, normalize_code};
use crate::error::WalletServiceError;

// ── IssueCreditLog ───────────────────────────────────────────────────────────

pub struct IssueCreditLogInput {
    pub user_id: Uuid,
    pub code: String,
    pub value: Decimal,
    pub expiry: DateTime<Utc>,
}

pub struct IssueCreditLogUseCase<U, L>
where
    U: UserRepository,
    L: CreditLogRepository,
{
    pub users: U,
    pub logs: L,
}

impl<U, L> IssueCreditLogUseCase<U, L>
where
    U: UserRepository,
    L: CreditLogRepository,
{
    pub async fn execute(&self, input: IssueCreditLogInput) -> Result<CreditLog, WalletServiceError> {
        let code = normalize_code(&input.code).ok_or(WalletServiceError::InvalidTokenCode)?;
        if !is_valid_money(input.value) {
            return Err(WalletServiceError::InvalidAmount);
        }
        let owner = self
            .users
            .find_by_id(input.user_id)
            .await?
            .ok_or(WalletServiceError::UserNotFound)?;

        let log = CreditLog {
            id: Uuid::now_v7(),
            code: code.to_owned(),
            value: to_money(input.value),
            credited_to: owner.id,
            credited_at: Utc::now(),
            expiry: input.expiry,
            used: false,
        };
        self.logs.create(&log).await?;
        Ok(log)
    }
}

// ── ApplyCredit ──────────────────────────────────────────────────────────────

pub struct ApplyCreditUseCase<L, B>
where
    L: CreditLogRepository,
    B: BalancePort,
{
    pub logs: L,
    pub balances: B,
    /// Append a ledger row for every credit.
    pub ledger: bool,
}

impl<L, B> ApplyCreditUseCase<L, B>
where
    L: CreditLogRepository,
    B: BalancePort,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<BalanceChange, WalletServiceError> {
        let code = normalize_code(code).ok_or(WalletServiceError::InvalidTokenCode)?;
        let log = self
            .logs
            .find_unused(user_id, code)
            .await?
            .ok_or(WalletServiceError::InvalidToken)?;

        if log.is_expired_at(now) {
            return Err(WalletServiceError::TokenExpired);
        }

        let entry = self.ledger.then(|| LedgerEntry::credit(&log, now));
        let change = self.balances.credit(&log, entry.as_ref()).await?;
        tracing::info!(%user_id, log_id = %log.id, amount = %change.amount, "credit applied");
        Ok(change)
    }
}
