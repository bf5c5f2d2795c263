use serde::Deserialize;

use loyalty_core::config::Config;

/// Points service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct PointsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3121). Env var: `POINTS_PORT`.
    #[serde(default = "default_points_port")]
    pub points_port: u16,
    /// SMTP relay host. Expiry notices are not sent when unset.
    pub smtp_host: Option<String>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// Sender address for notices (default `noreply@loyalty.local`).
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    /// Attach a QR code of the token id when a token is applied.
    #[serde(default = "enabled")]
    pub points_qr: bool,
    /// Minimum QR side in pixels (default 150).
    #[serde(default = "default_qr_size")]
    pub points_qr_size: u32,
}

fn default_points_port() -> u16 {
    3121
}

fn default_mail_from() -> String {
    "noreply@loyalty.local".to_owned()
}

fn enabled() -> bool {
    true
}

fn default_qr_size() -> u32 {
    150
}

impl Config for PointsConfig {}
