use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use loyalty_core::error::error_response;

/// Wallet service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum WalletServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("wallet not found")]
    WalletNotFound,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    TokenExpired,
    #[error("token already exists")]
    TokenAlreadyExists,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("invalid amount")]
    InvalidAmount,
    #[error("invalid token code")]
    InvalidTokenCode,
    #[error("invalid user data")]
    InvalidUser,
    #[error("invalid reason")]
    InvalidReason,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WalletServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::WalletNotFound => "WALLET_NOT_FOUND",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenAlreadyExists => "TOKEN_ALREADY_EXISTS",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidTokenCode => "INVALID_TOKEN_CODE",
            Self::InvalidUser => "INVALID_USER",
            Self::InvalidReason => "INVALID_REASON",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound | Self::WalletNotFound | Self::InvalidToken => {
                StatusCode::NOT_FOUND
            }
            Self::TokenExpired => StatusCode::GONE,
            Self::TokenAlreadyExists | Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::InsufficientBalance => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidAmount
            | Self::InvalidTokenCode
            | Self::InvalidUser
            | Self::InvalidReason => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WalletServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
