use chrono::{DateTime, Utc};
use uuid::Uuid;

use loyalty_domain::pagination::Sort;

/// Days before `valid_to` during which applying a token triggers an expiry notice.
pub const EXPIRY_NOTICE_DAYS: i64 = 2;

/// Longest accepted token code or name.
pub const MAX_CODE_LEN: usize = 50;

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 150;

/// Shopper known to the points service.
#[derive(Debug, Clone)]
pub struct PointsUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A discount token worth `value` points.
#[derive(Debug, Clone)]
pub struct DiscountToken {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub value: i32,
    pub remaining_value: i32,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl DiscountToken {
    /// Active and `valid_from <= now <= valid_to`.
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.active && self.valid_from <= now && now <= self.valid_to
    }

    /// Between 0 and `EXPIRY_NOTICE_DAYS` whole days remain before `valid_to`.
    pub fn is_expiring_soon(&self, now: DateTime<Utc>) -> bool {
        if self.valid_to < now {
            return false;
        }
        (self.valid_to - now).num_days() <= EXPIRY_NOTICE_DAYS
    }
}

/// One user's application of a token.
#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_id: Uuid,
    pub discount_used: i32,
    pub used_at: DateTime<Utc>,
}

/// A usage row joined with its token, as shown in the history.
#[derive(Debug, Clone)]
pub struct UsageHistoryEntry {
    pub usage: TokenUsage,
    pub token: DiscountToken,
}

/// Mail sent when a freshly applied token is about to expire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryNotice {
    pub username: String,
    pub email: String,
    pub token_code: String,
    pub valid_to: DateTime<Utc>,
}

impl ExpiryNotice {
    pub const SUBJECT: &'static str = "Your Token is Expiring Soon";

    pub fn body(&self) -> String {
        format!(
            "Hi {}, your token '{}' will expire on {}.",
            self.username,
            self.token_code,
            self.valid_to.format("%Y-%m-%d %H:%M UTC"),
        )
    }
}

/// Normalise a user-entered token code. `None` when empty or too long.
pub fn normalize_code(code: &str) -> Option<&str> {
    let code = code.trim();
    if code.is_empty() || code.chars().count() > MAX_CODE_LEN {
        None
    } else {
        Some(code)
    }
}

/// Username 1-150 chars without whitespace; email must look like `local@domain`.
pub fn validate_user(username: &str, email: &str) -> bool {
    let username_ok = !username.is_empty()
        && username.chars().count() <= MAX_USERNAME_LEN
        && !username.chars().any(char::is_whitespace);
    let email_ok = matches!(
        email.split_once('@'),
        Some((local, domain)) if !local.is_empty() && domain.contains('.')
    );
    username_ok && email_ok
}

/// Sort options for the usage history.
#[derive(Debug, Clone, Copy)]
pub enum HistorySortBy {
    UsedAt(Sort),
}

impl Default for HistorySortBy {
    fn default() -> Self {
        Self::UsedAt(Sort::Desc)
    }
}

impl HistorySortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "used-at-desc" => Some(Self::UsedAt(Sort::Desc)),
            "used-at-asc" => Some(Self::UsedAt(Sort::Asc)),
            _ => None,
        }
    }
}

/// What the applied-token QR code encodes.
pub fn token_qr_payload(token_id: Uuid) -> String {
    token_id.to_string()
}
