use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use loyalty_domain::amount::MAX_MONEY;
use loyalty_domain::pagination::PageRequest;
use loyalty_wallet::domain::repository::{
    BalancePort, CreditLogRepository, LedgerRepository, UserRepository, WalletRepository,
};
use loyalty_wallet::domain::types::{
    BalanceChange, CreditLog, LedgerEntry, Wallet, WalletUser,
};
use loyalty_wallet::error::WalletServiceError;
use loyalty_wallet::usecase::credit::ApplyCreditUseCase;
use loyalty_wallet::usecase::debit::DebitUseCase;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Store {
    pub users: Vec<WalletUser>,
    pub wallets: Vec<Wallet>,
    pub logs: Vec<CreditLog>,
    pub ledger: Vec<LedgerEntry>,
}

pub type SharedStore = Arc<Mutex<Store>>;

pub fn store() -> SharedStore {
    Arc::new(Mutex::new(Store::default()))
}

/// A user with a wallet holding `balance`.
pub fn user_with_balance(store: &SharedStore, username: &str, balance: &str) -> WalletUser {
    let now = Utc::now();
    let user = WalletUser {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        created_at: now,
    };
    let mut wallet = Wallet::empty(user.id, now);
    wallet.balance = dec(balance);
    let mut guard = store.lock().unwrap();
    guard.users.push(user.clone());
    guard.wallets.push(wallet);
    user
}

pub fn credit_log(
    store: &SharedStore,
    owner: Uuid,
    code: &str,
    value: &str,
    expiry: DateTime<Utc>,
) -> CreditLog {
    let log = CreditLog {
        id: Uuid::now_v7(),
        code: code.to_owned(),
        value: dec(value),
        credited_to: owner,
        credited_at: Utc::now() - Duration::days(1),
        expiry,
        used: false,
    };
    store.lock().unwrap().logs.push(log.clone());
    log
}

pub fn balance_of(store: &SharedStore, user_id: Uuid) -> Decimal {
    store
        .lock()
        .unwrap()
        .wallets
        .iter()
        .find(|w| w.user_id == user_id)
        .map(|w| w.balance)
        .unwrap_or_default()
}

pub fn log_used(store: &SharedStore, log_id: Uuid) -> bool {
    store
        .lock()
        .unwrap()
        .logs
        .iter()
        .any(|l| l.id == log_id && l.used)
}

pub fn ledger_of(store: &SharedStore, user_id: Uuid) -> Vec<LedgerEntry> {
    store
        .lock()
        .unwrap()
        .ledger
        .iter()
        .filter(|e| e.user_id == user_id)
        .cloned()
        .collect()
}

// ── Mock repositories ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo(pub SharedStore);

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WalletUser>, WalletServiceError> {
        Ok(self.0.lock().unwrap().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_with_wallet(
        &self,
        user: &WalletUser,
        wallet: &Wallet,
    ) -> Result<(), WalletServiceError> {
        let mut store = self.0.lock().unwrap();
        store.users.push(user.clone());
        store.wallets.push(wallet.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockWalletRepo(pub SharedStore);

impl WalletRepository for MockWalletRepo {
    async fn find(&self, user_id: Uuid) -> Result<Option<Wallet>, WalletServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .wallets
            .iter()
            .find(|w| w.user_id == user_id)
            .cloned())
    }
}

#[derive(Clone)]
pub struct MockCreditLogRepo(pub SharedStore);

impl CreditLogRepository for MockCreditLogRepo {
    async fn find_unused(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<CreditLog>, WalletServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .logs
            .iter()
            .find(|l| l.code == code && l.credited_to == user_id && !l.used)
            .cloned())
    }

    async fn create(&self, log: &CreditLog) -> Result<(), WalletServiceError> {
        let mut store = self.0.lock().unwrap();
        if store.logs.iter().any(|l| l.code == log.code) {
            return Err(WalletServiceError::TokenAlreadyExists);
        }
        store.logs.push(log.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockLedgerRepo(pub SharedStore);

impl LedgerRepository for MockLedgerRepo {
    async fn list(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<LedgerEntry>, WalletServiceError> {
        let mut entries = ledger_of(&self.0, user_id);
        entries.sort_by_key(|e| std::cmp::Reverse(e.created_at));
        Ok(entries
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }
}

/// Same guards as the SQL: `used = false` and the `MAX_MONEY` cap on credit,
/// `balance >= amount` on debit.
#[derive(Clone)]
pub struct MockBalancePort(pub SharedStore);

impl BalancePort for MockBalancePort {
    async fn credit(
        &self,
        log: &CreditLog,
        entry: Option<&LedgerEntry>,
    ) -> Result<BalanceChange, WalletServiceError> {
        let mut store = self.0.lock().unwrap();
        let Store {
            wallets,
            logs,
            ledger,
            ..
        } = &mut *store;
        let stored = logs
            .iter_mut()
            .find(|l| l.id == log.id && !l.used)
            .ok_or(WalletServiceError::InvalidToken)?;
        let wallet = wallets
            .iter_mut()
            .find(|w| w.user_id == log.credited_to)
            .ok_or(WalletServiceError::WalletNotFound)?;
        if wallet.balance > MAX_MONEY - log.value {
            return Err(WalletServiceError::InvalidAmount);
        }
        stored.used = true;
        wallet.balance += log.value;
        if let Some(entry) = entry {
            ledger.push(entry.clone());
        }
        Ok(BalanceChange {
            amount: log.value,
            balance: wallet.balance,
        })
    }

    async fn debit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        entry: Option<&LedgerEntry>,
    ) -> Result<BalanceChange, WalletServiceError> {
        let mut store = self.0.lock().unwrap();
        let Store {
            wallets, ledger, ..
        } = &mut *store;
        let wallet = wallets
            .iter_mut()
            .find(|w| w.user_id == user_id && w.balance >= amount)
            .ok_or(WalletServiceError::InsufficientBalance)?;
        wallet.balance -= amount;
        if let Some(entry) = entry {
            ledger.push(entry.clone());
        }
        Ok(BalanceChange {
            amount,
            balance: wallet.balance,
        })
    }
}

// ── Use case builders ────────────────────────────────────────────────────────

pub fn apply_usecase(
    store: &SharedStore,
    ledger: bool,
) -> ApplyCreditUseCase<MockCreditLogRepo, MockBalancePort> {
    ApplyCreditUseCase {
        logs: MockCreditLogRepo(store.clone()),
        balances: MockBalancePort(store.clone()),
        ledger,
    }
}

pub fn debit_usecase(
    store: &SharedStore,
    ledger: bool,
) -> DebitUseCase<MockWalletRepo, MockBalancePort> {
    DebitUseCase {
        wallets: MockWalletRepo(store.clone()),
        balances: MockBalancePort(store.clone()),
        ledger,
    }
}
