use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use loyalty_core::error::error_response;

/// Points service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PointsServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("invalid or expired token")]
    TokenNotFound,
    #[error("you've already used this token")]
    TokenAlreadyUsed,
    #[error("token has not been applied")]
    TokenNotApplied,
    #[error("token already exists")]
    TokenAlreadyExists,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid token code")]
    InvalidTokenCode,
    #[error("invalid token name")]
    InvalidTokenName,
    #[error("invalid validity window")]
    InvalidValidityWindow,
    #[error("invalid amount")]
    InvalidAmount,
    #[error("invalid user data")]
    InvalidUser,
    #[error("token was updated concurrently, retry")]
    Conflict,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PointsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::TokenAlreadyUsed => "TOKEN_ALREADY_USED",
            Self::TokenNotApplied => "TOKEN_NOT_APPLIED",
            Self::TokenAlreadyExists => "TOKEN_ALREADY_EXISTS",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidTokenCode => "INVALID_TOKEN_CODE",
            Self::InvalidTokenName => "INVALID_TOKEN_NAME",
            Self::InvalidValidityWindow => "INVALID_VALIDITY_WINDOW",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidUser => "INVALID_USER",
            Self::Conflict => "CONFLICT",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound | Self::TokenNotFound => StatusCode::NOT_FOUND,
            Self::TokenAlreadyUsed
            | Self::TokenNotApplied
            | Self::TokenAlreadyExists
            | Self::UserAlreadyExists
            | Self::Conflict => StatusCode::CONFLICT,
            Self::InvalidTokenCode
            | Self::InvalidTokenName
            | Self::InvalidValidityWindow
            | Self::InvalidAmount
            | Self::InvalidUser => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PointsServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
