#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use loyalty_domain::pagination::PageRequest;

use crate::domain::types::{
    DiscountToken, ExpiryNotice, HistorySortBy, PointsUser, TokenUsage, UsageHistoryEntry,
};
use crate::error::PointsServiceError;

/// Repository for mirrored shoppers.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PointsUser>, PointsServiceError>;

    /// Fails with `UserAlreadyExists` on a duplicate id or username.
    async fn create(&self, user: &PointsUser) -> Result<(), PointsServiceError>;
}

/// Repository for discount tokens.
pub trait TokenRepository: Send + Sync {
    /// Case-insensitive code lookup restricted to active tokens whose window contains `now`.
    async fn find_redeemable_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DiscountToken>, PointsServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DiscountToken>, PointsServiceError>;

    /// Fails with `TokenAlreadyExists` when the code collides, ignoring case.
    async fn create(&self, token: &DiscountToken) -> Result<(), PointsServiceError>;
}

/// Repository for per-user token applications.
pub trait UsageRepository: Send + Sync {
    async fn find(
        &self,
        user_id: Uuid,
        token_id: Uuid,
    ) -> Result<Option<TokenUsage>, PointsServiceError>;

    /// Fails with `TokenAlreadyUsed` when the (user, token) pair already exists.
    async fn create(&self, usage: &TokenUsage) -> Result<(), PointsServiceError>;

    async fn list_history(
        &self,
        user_id: Uuid,
        sort_by: HistorySortBy,
        page: PageRequest,
    ) -> Result<Vec<UsageHistoryEntry>, PointsServiceError>;
}

/// Atomically draw `discount` points from a token and book them on one user's usage row.
pub trait RedeemPort: Send + Sync {
    /// Returns `Conflict` if the token no longer holds `discount` points.
    async fn redeem(
        &self,
        user_id: Uuid,
        token_id: Uuid,
        discount: i32,
    ) -> Result<(), PointsServiceError>;
}

/// Outbound mail.
pub trait NotificationPort: Send + Sync {
    async fn send_expiry_notice(&self, notice: &ExpiryNotice) -> Result<(), PointsServiceError>;
}
