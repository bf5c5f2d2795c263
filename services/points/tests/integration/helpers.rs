use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use loyalty_domain::pagination::{PageRequest, Sort};
use loyalty_points::domain::repository::{
    NotificationPort, RedeemPort, TokenRepository, UsageRepository, UserRepository,
};
use loyalty_points::domain::types::{
    DiscountToken, ExpiryNotice, HistorySortBy, PointsUser, TokenUsage, UsageHistoryEntry,
};
use loyalty_points::error::PointsServiceError;
use loyalty_points::usecase::checkout::CheckoutUseCase;
use loyalty_points::usecase::token::ApplyTokenUseCase;

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Store {
    pub users: Vec<PointsUser>,
    pub tokens: Vec<DiscountToken>,
    pub usages: Vec<TokenUsage>,
}

pub type SharedStore = Arc<Mutex<Store>>;

pub fn store() -> SharedStore {
    Arc::new(Mutex::new(Store::default()))
}

pub fn user(store: &SharedStore, username: &str) -> PointsUser {
    let user = PointsUser {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        created_at: Utc::now(),
    };
    store.lock().unwrap().users.push(user.clone());
    user
}

pub fn token(
    store: &SharedStore,
    code: &str,
    value: i32,
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
) -> DiscountToken {
    let token = DiscountToken {
        id: Uuid::now_v7(),
        name: "PromoToken".to_owned(),
        code: code.to_owned(),
        value,
        remaining_value: value,
        valid_from,
        valid_to,
        active: true,
        created_at: valid_from,
    };
    store.lock().unwrap().tokens.push(token.clone());
    token
}

/// A token valid from a day ago until `days` days from now.
pub fn token_for_days(store: &SharedStore, code: &str, value: i32, days: i64) -> DiscountToken {
    let now = Utc::now();
    token(store, code, value, now - Duration::days(1), now + Duration::days(days))
}

pub fn usage_of(store: &SharedStore, user_id: Uuid, token_id: Uuid) -> Option<TokenUsage> {
    store
        .lock()
        .unwrap()
        .usages
        .iter()
        .find(|u| u.user_id == user_id && u.token_id == token_id)
        .cloned()
}

pub fn remaining_of(store: &SharedStore, token_id: Uuid) -> i32 {
    store
        .lock()
        .unwrap()
        .tokens
        .iter()
        .find(|t| t.id == token_id)
        .map(|t| t.remaining_value)
        .unwrap_or_default()
}

// ── Mock repositories ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo(pub SharedStore);

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PointsUser>, PointsServiceError> {
        Ok(self.0.lock().unwrap().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &PointsUser) -> Result<(), PointsServiceError> {
        self.0.lock().unwrap().users.push(user.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockTokenRepo(pub SharedStore);

impl TokenRepository for MockTokenRepo {
    async fn find_redeemable_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DiscountToken>, PointsServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .tokens
            .iter()
            .find(|t| t.code.to_lowercase() == code.to_lowercase() && t.is_redeemable_at(now))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DiscountToken>, PointsServiceError> {
        Ok(self.0.lock().unwrap().tokens.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, token: &DiscountToken) -> Result<(), PointsServiceError> {
        self.0.lock().unwrap().tokens.push(token.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockUsageRepo(pub SharedStore);

impl UsageRepository for MockUsageRepo {
    async fn find(
        &self,
        user_id: Uuid,
        token_id: Uuid,
    ) -> Result<Option<TokenUsage>, PointsServiceError> {
        Ok(usage_of(&self.0, user_id, token_id))
    }

    async fn create(&self, usage: &TokenUsage) -> Result<(), PointsServiceError> {
        let mut store = self.0.lock().unwrap();
        if store
            .usages
            .iter()
            .any(|u| u.user_id == usage.user_id && u.token_id == usage.token_id)
        {
            return Err(PointsServiceError::TokenAlreadyUsed);
        }
        store.usages.push(usage.clone());
        Ok(())
    }

    async fn list_history(
        &self,
        user_id: Uuid,
        sort_by: HistorySortBy,
        page: PageRequest,
    ) -> Result<Vec<UsageHistoryEntry>, PointsServiceError> {
        let store = self.0.lock().unwrap();
        let mut entries: Vec<UsageHistoryEntry> = store
            .usages
            .iter()
            .filter(|u| u.user_id == user_id)
            .filter_map(|u| {
                let token = store.tokens.iter().find(|t| t.id == u.token_id)?;
                Some(UsageHistoryEntry {
                    usage: u.clone(),
                    token: token.clone(),
                })
            })
            .collect();
        entries.sort_by_key(|e| e.usage.used_at);
        if matches!(sort_by, HistorySortBy::UsedAt(Sort::Desc)) {
            entries.reverse();
        }
        Ok(entries
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }
}

/// Guarded draw against the shared store, mirroring the SQL `remaining_value >= discount` check.
#[derive(Clone)]
pub struct MockRedeemPort(pub SharedStore);

impl RedeemPort for MockRedeemPort {
    async fn redeem(
        &self,
        user_id: Uuid,
        token_id: Uuid,
        discount: i32,
    ) -> Result<(), PointsServiceError> {
        let mut store = self.0.lock().unwrap();
        let Store { tokens, usages, .. } = &mut *store;
        let usage = usages
            .iter_mut()
            .find(|u| u.user_id == user_id && u.token_id == token_id)
            .ok_or(PointsServiceError::TokenNotApplied)?;
        let token = tokens
            .iter_mut()
            .find(|t| t.id == token_id && t.remaining_value >= discount)
            .ok_or(PointsServiceError::Conflict)?;
        token.remaining_value -= discount;
        usage.discount_used += discount;
        Ok(())
    }
}

// ── Mock notifier ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<ExpiryNotice>>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<ExpiryNotice> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationPort for MockNotifier {
    async fn send_expiry_notice(&self, notice: &ExpiryNotice) -> Result<(), PointsServiceError> {
        if self.fail {
            return Err(anyhow::anyhow!("smtp unavailable").into());
        }
        self.sent.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

// ── Use case builders ────────────────────────────────────────────────────────

pub fn apply_usecase(
    store: &SharedStore,
    notifier: MockNotifier,
) -> ApplyTokenUseCase<MockUserRepo, MockTokenRepo, MockUsageRepo, MockNotifier> {
    ApplyTokenUseCase {
        users: MockUserRepo(store.clone()),
        tokens: MockTokenRepo(store.clone()),
        usages: MockUsageRepo(store.clone()),
        notifier,
    }
}

pub fn checkout_usecase(
    store: &SharedStore,
) -> CheckoutUseCase<MockTokenRepo, MockUsageRepo, MockRedeemPort> {
    CheckoutUseCase {
        tokens: MockTokenRepo(store.clone()),
        usages: MockUsageRepo(store.clone()),
        redeemer: MockRedeemPort(store.clone()),
    }
}
