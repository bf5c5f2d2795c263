use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Ledger reason used when a debit names none.
pub const DEFAULT_DEBIT_REASON: &str = "Purchase";

/// Longest ledger reason the column holds.
pub const MAX_REASON_LEN: usize = 255;

/// Longest accepted credit code.
pub const MAX_CODE_LEN: usize = 50;

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 150;

/// Account holder; always owns exactly one wallet.
#[derive(Debug, Clone)]
pub struct WalletUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Wallet {
    pub user_id: Uuid,
    pub balance: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Fresh zero-balance wallet for a newly created user.
    pub fn empty(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            balance: Decimal::ZERO,
            updated_at: now,
        }
    }
}

/// Single-use credit code issued to `credited_to`.
#[derive(Debug, Clone)]
pub struct CreditLog {
    pub id: Uuid,
    pub code: String,
    pub value: Decimal,
    pub credited_to: Uuid,
    pub credited_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub used: bool,
}

impl CreditLog {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

/// One append-only ledger row.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn credit(log: &CreditLog, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: log.credited_to,
            amount: log.value,
            kind: TransactionKind::Credit,
            reason: format!("Token {} redeemed", log.code),
            created_at: now,
        }
    }

    pub fn debit(user_id: Uuid, amount: Decimal, reason: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            amount,
            kind: TransactionKind::Debit,
            reason: reason.to_owned(),
            created_at: now,
        }
    }
}

/// Result of a successful credit or debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    pub amount: Decimal,
    pub balance: Decimal,
}

/// What the wallet QR code encodes.
pub fn wallet_qr_payload(user_id: Uuid) -> String {
    format!("WALLET:{user_id}")
}

/// Trimmed debit reason, `DEFAULT_DEBIT_REASON` when blank, `None` when too long.
pub fn normalize_reason(reason: Option<&str>) -> Option<&str> {
    match reason.map(str::trim) {
        None | Some("") => Some(DEFAULT_DEBIT_REASON),
        Some(reason) if reason.chars().count() <= MAX_REASON_LEN => Some(reason),
        Some(_) => None,
    }
}

/// Credit codes match exactly; only surrounding whitespace is dropped.
pub fn normalize_code(code: &str) -> Option<&str> {
    let code = code.trim();
    if code.is_empty() || code.chars().count() > MAX_CODE_LEN {
        None
    } else {
        Some(code)
    }
}

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
