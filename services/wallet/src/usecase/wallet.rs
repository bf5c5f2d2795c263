use uuid::Uuid;

use loyalty_domain::pagination::PageRequest;

use crate::domain::repository::{LedgerRepository, QrRenderer, WalletRepository};
use crate::domain::types::{LedgerEntry, Wallet, wallet_qr_payload};
use crate::error::WalletServiceError;

// ── GetWallet ────────────────────────────────────────────────────────────────

pub struct WalletView {
    pub wallet: Wallet,
    /// Base64 PNG, present when QR rendering is enabled.
    pub qr_png_base64: Option<String>,
}

pub struct GetWalletUseCase<W, Q>
where
    W: WalletRepository,
    Q: QrRenderer,
{
    pub wallets: W,
    pub qr: Option<Q>,
}

impl<W, Q> GetWalletUseCase<W, Q>
where
    W: WalletRepository,
    Q: QrRenderer,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<WalletView, WalletServiceError> {
        let wallet = self
            .wallets
            .find(user_id)
            .await?
            .ok_or(WalletServiceError::WalletNotFound)?;
        let qr_png_base64 = match &self.qr {
            Some(qr) => Some(qr.render_png_base64(&wallet_qr_payload(user_id))?),
            None => None,
        };
        Ok(WalletView {
            wallet,
            qr_png_base64,
        })
    }
}

// ── ListTransactions ─────────────────────────────────────────────────────────

pub struct ListTransactionsUseCase<L: LedgerRepository> {
    pub ledger: L,
}

impl<L: LedgerRepository> ListTransactionsUseCase<L> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<LedgerEntry>, WalletServiceError> {
        self.ledger.list(user_id, page.clamped()).await
    }
}
