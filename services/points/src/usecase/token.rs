use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::{
    NotificationPort, TokenRepository, UsageRepository, UserRepository,
};
use crate::domain::types::{
    DiscountToken, ExpiryNotice, MAX_CODE_LEN, TokenUsage, normalize_code,
};
use crate::error::PointsServiceError;

/// Name given to tokens issued without one.
pub const DEFAULT_TOKEN_NAME: &str = "PromoToken";

// ── IssueToken ───────────────────────────────────────────────────────────────

pub struct IssueTokenInput {
    pub name: Option<String>,
    pub code: String,
    pub value: i32,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: DateTime<Utc>,
    pub active: Option<bool>,
}

pub struct IssueTokenUseCase<T: TokenRepository> {
    pub tokens: T,
}

impl<T: TokenRepository> IssueTokenUseCase<T> {
    pub async fn execute(&self, input: IssueTokenInput) -> Result<DiscountToken, PointsServiceError> {
        let code = normalize_code(&input.code).ok_or(PointsServiceError::InvalidTokenCode)?;
        let name = match input.name.as_deref().map(str::trim) {
            None => DEFAULT_TOKEN_NAME,
            Some(name) if !name.is_empty() && name.chars().count() <= MAX_CODE_LEN => name,
            Some(_) => return Err(PointsServiceError::InvalidTokenName),
        };
        if input.value < 0 {
            return Err(PointsServiceError::InvalidAmount);
        }
        let now = Utc::now();
        let valid_from = input.valid_from.unwrap_or(now);
        if valid_from > input.valid_to {
            return Err(PointsServiceError::InvalidValidityWindow);
        }

        let token = DiscountToken {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            code: code.to_owned(),
            value: input.value,
            remaining_value: input.value,
            valid_from,
            valid_to: input.valid_to,
            active: input.active.unwrap_or(true),
            created_at: now,
        };
        self.tokens.create(&token).await?;
        Ok(token)
    }
}

// ── ApplyToken ───────────────────────────────────────────────────────────────

pub struct ApplyTokenUseCase<U, T, S, N>
where
    U: UserRepository,
    T: TokenRepository,
    S: UsageRepository,
    N: NotificationPort,
{
    pub users: U,
    pub tokens: T,
    pub usages: S,
    pub notifier: N,
}

impl<U, T, S, N> ApplyTokenUseCase<U, T, S, N>
where
    U: UserRepository,
    T: TokenRepository,
    S: UsageRepository,
    N: NotificationPort,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<DiscountToken, PointsServiceError> {
        let code = normalize_code(code).ok_or(PointsServiceError::InvalidTokenCode)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(PointsServiceError::UserNotFound)?;

        let token = self
            .tokens
            .find_redeemable_by_code(code, now)
            .await?
            .ok_or(PointsServiceError::TokenNotFound)?;

        if self.usages.find(user.id, token.id).await?.is_some() {
            return Err(PointsServiceError::TokenAlreadyUsed);
        }

        // A concurrent duplicate trips the unique (user_id, token_id) index instead.
        self.usages
            .create(&TokenUsage {
                id: Uuid::now_v7(),
                user_id: user.id,
                token_id: token.id,
                discount_used: 0,
                used_at: now,
            })
            .await?;

        if token.is_expiring_soon(now) {
            let notice = ExpiryNotice {
                username: user.username,
                email: user.email,
                token_code: token.code.clone(),
                valid_to: token.valid_to,
            };
            if let Err(e) = self.notifier.send_expiry_notice(&notice).await {
                tracing::warn!(error = %e, token_id = %token.id, "expiry notice not sent");
            }
        }

        Ok(token)
    }
}
