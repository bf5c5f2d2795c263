use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbBalancePort, DbCreditLogRepository, DbLedgerRepository, DbUserRepository,
    DbWalletRepository,
};
use crate::infra::qr::PngQrRenderer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Append ledger rows on credit and debit.
    pub ledger: bool,
    /// `None` disables the wallet QR code.
    pub qr: Option<PngQrRenderer>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn wallet_repo(&self) -> DbWalletRepository {
        DbWalletRepository {
            db: self.db.clone(),
        }
    }

    pub fn credit_log_repo(&self) -> DbCreditLogRepository {
        DbCreditLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn ledger_repo(&self) -> DbLedgerRepository {
        DbLedgerRepository {
            db: self.db.clone(),
        }
    }

    pub fn balance_port(&self) -> DbBalancePort {
        DbBalancePort {
            db: self.db.clone(),
        }
    }
}
