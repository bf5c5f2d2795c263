use sea_orm::DatabaseConnection;

use loyalty_core::qr::PngQrRenderer;

use crate::infra::db::{DbRedeemPort, DbTokenRepository, DbUsageRepository, DbUserRepository};
use crate::infra::mail::SmtpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: SmtpMailer,
    /// `None` leaves the QR code out of applied-token responses.
    pub qr: Option<PngQrRenderer>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn token_repo(&self) -> DbTokenRepository {
        DbTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn usage_repo(&self) -> DbUsageRepository {
        DbUsageRepository {
            db: self.db.clone(),
        }
    }

    pub fn redeem_port(&self) -> DbRedeemPort {
        DbRedeemPort {
            db: self.db.clone(),
        }
    }
}
