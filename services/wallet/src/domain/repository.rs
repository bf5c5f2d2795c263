#![allow(async_fn_in_trait)]

use rust_decimal::Decimal;
use uuid::Uuid;

use loyalty_domain::pagination::PageRequest;

use crate::domain::types::{BalanceChange, CreditLog, LedgerEntry, Wallet, WalletUser};
use crate::error::WalletServiceError;

/// Repository for account holders.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WalletUser>, WalletServiceError>;

    /// Insert the user and its wallet in one transaction.
    async fn create_with_wallet(
        &self,
        user: &WalletUser,
        wallet: &Wallet,
    ) -> Result<(), WalletServiceError>;
}

pub trait WalletRepository: Send + Sync {
    async fn find(&self, user_id: Uuid) -> Result<Option<Wallet>, WalletServiceError>;
}

/// Repository for single-use credit codes.
pub trait CreditLogRepository: Send + Sync {
    /// Unused log with exactly this code, owned by `user_id`.
    async fn find_unused(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<CreditLog>, WalletServiceError>;

    /// Fails with `TokenAlreadyExists` on a duplicate code.
    async fn create(&self, log: &CreditLog) -> Result<(), WalletServiceError>;
}

/// Read side of the ledger.
pub trait LedgerRepository: Send + Sync {
    async fn list(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<LedgerEntry>, WalletServiceError>;
}

/// Balance mutations. Each call is one transaction; `entry` is appended in it when given.
pub trait BalancePort: Send + Sync {
    /// Consume `log` and add its value to the owner's wallet.
    /// Returns `InvalidToken` when the log was consumed concurrently.
    async fn credit(
        &self,
        log: &CreditLog,
        entry: Option<&LedgerEntry>,
    ) -> Result<BalanceChange, WalletServiceError>;

    /// Subtract `amount` if the balance covers it, else `InsufficientBalance`.
    async fn debit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        entry: Option<&LedgerEntry>,
    ) -> Result<BalanceChange, WalletServiceError>;
}

/// Encodes a payload as a base64 PNG QR code.
pub trait QrRenderer: Send + Sync {
    fn render_png_base64(&self, payload: &str) -> Result<String, WalletServiceError>;
}
