use serde::Deserialize;

use loyalty_core::config::Config;

/// Wallet service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct WalletConfig {
    pub database_url: String,
    /// Default 3122. Env var: `WALLET_PORT`.
    #[serde(default = "default_wallet_port")]
    pub wallet_port: u16,
    /// Record every credit and debit in the ledger. `false` runs without a ledger.
    #[serde(default = "enabled")]
    pub wallet_ledger: bool,
    /// Attach a QR code to `GET /wallet`.
    #[serde(default = "enabled")]
    pub wallet_qr: bool,
    /// Minimum QR side in pixels (default 150).
    #[serde(default = "default_qr_size")]
    pub wallet_qr_size: u32,
}

fn default_wallet_port() -> u16 {
    3122
}

fn enabled() -> bool {
    true
}

fn default_qr_size() -> u32 {
    150
}

impl Config for WalletConfig {}
