use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use loyalty_domain::amount::is_valid_money;

use crate::domain::repository::{BalancePort, WalletRepository};
use crate::domain::types::{BalanceChange, LedgerEntry, normalize_reason};
use crate::error::WalletServiceError;

pub struct DebitInput {
    pub amount: Decimal,
    pub reason: Option<String>,
}

pub struct DebitUseCase<W, B>
where
    W: WalletRepository,
    B: BalancePort,
{
    pub wallets: W,
    pub balances: B,
    /// Append a ledger row for every debit.
    pub ledger: bool,
}

impl<W, B> DebitUseCase<W, B>
where
    W: WalletRepository,
    B: BalancePort,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: DebitInput,
        now: DateTime<Utc>,
    ) -> Result<BalanceChange, WalletServiceError> {
        if !is_valid_money(input.amount) {
            return Err(WalletServiceError::InvalidAmount);
        }
        let reason =
            normalize_reason(input.reason.as_deref()).ok_or(WalletServiceError::InvalidReason)?;

        if self.wallets.find(user_id).await?.is_none() {
            return Err(WalletServiceError::WalletNotFound);
        }

        let entry = self
            .ledger
            .then(|| LedgerEntry::debit(user_id, input.amount, reason, now));
        self.balances
            .debit(user_id, input.amount, entry.as_ref())
            .await
    }
}
