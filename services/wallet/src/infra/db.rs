use anyhow::Context as _;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, UpdateMany,
    sea_query::Expr,
};
use uuid::Uuid;

use loyalty_core::sea_ext::is_unique_violation;
use loyalty_domain::amount::{MAX_MONEY, to_money};
use loyalty_domain::pagination::PageRequest;
use loyalty_wallet_schema::{token_credit_logs, users, wallet_transactions, wallets};

use crate::domain::repository::{
    BalancePort, CreditLogRepository, LedgerRepository, UserRepository, WalletRepository,
};
use crate::domain::types::{
    BalanceChange, CreditLog, LedgerEntry, TransactionKind, Wallet, WalletUser,
};
use crate::error::WalletServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WalletUser>, WalletServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(|m| WalletUser {
            id: m.id,
            username: m.username,
            email: m.email,
            created_at: m.created_at,
        }))
    }

    async fn create_with_wallet(
        &self,
        user: &WalletUser,
        wallet: &Wallet,
    ) -> Result<(), WalletServiceError> {
        let user = user.clone();
        let wallet = wallet.clone();
        let result = self
            .db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        username: Set(user.username),
                        email: Set(user.email),
                        created_at: Set(user.created_at),
                    }
                    .insert(txn)
                    .await?;

                    wallets::ActiveModel {
                        user_id: Set(wallet.user_id),
                        balance: Set(wallet.balance),
                        updated_at: Set(wallet.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(sea_orm::TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Err(WalletServiceError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("create user with wallet")
                .into()),
        }
    }
}

// ── Wallet repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbWalletRepository {
    pub db: DatabaseConnection,
}

impl WalletRepository for DbWalletRepository {
    async fn find(&self, user_id: Uuid) -> Result<Option<Wallet>, WalletServiceError> {
        let model = wallets::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find wallet")?;
        Ok(model.map(wallet_from_model))
    }
}

fn wallet_from_model(model: wallets::Model) -> Wallet {
    Wallet {
        user_id: model.user_id,
        balance: to_money(model.balance),
        updated_at: model.updated_at,
    }
}

// ── Credit log repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCreditLogRepository {
    pub db: DatabaseConnection,
}

impl CreditLogRepository for DbCreditLogRepository {
    async fn find_unused(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<CreditLog>, WalletServiceError> {
        let model = token_credit_logs::Entity::find()
            .filter(token_credit_logs::Column::Code.eq(code))
            .filter(token_credit_logs::Column::CreditedTo.eq(user_id))
            .filter(token_credit_logs::Column::Used.eq(false))
            .one(&self.db)
            .await
            .context("find unused credit log")?;
        Ok(model.map(|m| CreditLog {
            id: m.id,
            code: m.code,
            value: to_money(m.value),
            credited_to: m.credited_to,
            credited_at: m.credited_at,
            expiry: m.expiry,
            used: m.used,
        }))
    }

    async fn create(&self, log: &CreditLog) -> Result<(), WalletServiceError> {
        let result = token_credit_logs::ActiveModel {
            id: Set(log.id),
            code: Set(log.code.clone()),
            value: Set(log.value),
            credited_to: Set(log.credited_to),
            credited_at: Set(log.credited_at),
            expiry: Set(log.expiry),
            used: Set(log.used),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(WalletServiceError::TokenAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create credit log").into()),
        }
    }
}

// ── Ledger repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLedgerRepository {
    pub db: DatabaseConnection,
}

impl LedgerRepository for DbLedgerRepository {
    async fn list(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<LedgerEntry>, WalletServiceError> {
        let models = wallet_transactions::Entity::find()
            .filter(wallet_transactions::Column::UserId.eq(user_id))
            .order_by_desc(wallet_transactions::Column::CreatedAt)
            .order_by_desc(wallet_transactions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list wallet transactions")?;
        Ok(models.into_iter().map(entry_from_model).collect())
    }
}

fn entry_from_model(model: wallet_transactions::Model) -> LedgerEntry {
    LedgerEntry {
        id: model.id,
        user_id: model.user_id,
        amount: to_money(model.amount),
        kind: match model.kind {
            wallet_transactions::TransactionKind::Credit => TransactionKind::Credit,
            wallet_transactions::TransactionKind::Debit => TransactionKind::Debit,
        },
        reason: model.reason,
        created_at: model.created_at,
    }
}

async fn append_entry(
    txn: &DatabaseTransaction,
    entry: &LedgerEntry,
) -> Result<(), sea_orm::DbErr> {
    wallet_transactions::ActiveModel {
        id: Set(entry.id),
        user_id: Set(entry.user_id),
        amount: Set(entry.amount),
        kind: Set(match entry.kind {
            TransactionKind::Credit => wallet_transactions::TransactionKind::Credit,
            TransactionKind::Debit => wallet_transactions::TransactionKind::Debit,
        }),
        reason: Set(entry.reason.clone()),
        created_at: Set(entry.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

// ── Balance port ─────────────────────────────────────────────────────────────

/// Direction of a guarded balance update.
#[derive(Debug, Clone, Copy)]
enum BalanceShift {
    /// Add; refused when the result would exceed `MAX_MONEY`.
    Credit(Decimal),
    /// Subtract; refused when the balance does not cover it.
    Debit(Decimal),
}

fn balance_update(user_id: Uuid, shift: BalanceShift) -> UpdateMany<wallets::Entity> {
    let balance = Expr::col(wallets::Column::Balance);
    let (value, guard) = match shift {
        BalanceShift::Credit(amount) => (
            balance.add(amount),
            wallets::Column::Balance.lte(MAX_MONEY - amount),
        ),
        BalanceShift::Debit(amount) => (
            balance.sub(amount),
            wallets::Column::Balance.gte(amount),
        ),
    };
    wallets::Entity::update_many()
        .col_expr(wallets::Column::Balance, value)
        .col_expr(wallets::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(wallets::Column::UserId.eq(user_id))
        .filter(guard)
}

/// Flip `used` only while it is still false.
fn consume_credit_log(log_id: Uuid) -> UpdateMany<token_credit_logs::Entity> {
    token_credit_logs::Entity::update_many()
        .col_expr(token_credit_logs::Column::Used, Expr::value(true))
        .filter(token_credit_logs::Column::Id.eq(log_id))
        .filter(token_credit_logs::Column::Used.eq(false))
}

#[derive(Clone)]
pub struct DbBalancePort {
    pub db: DatabaseConnection,
}

impl DbBalancePort {
    /// New balance, or `None` when the guard matched no row.
    async fn shift_balance(
        txn: &DatabaseTransaction,
        user_id: Uuid,
        shift: BalanceShift,
    ) -> Result<Option<Decimal>, sea_orm::DbErr> {
        let updated = balance_update(user_id, shift).exec_with_returning(txn).await?;
        Ok(updated.into_iter().next().map(|w| to_money(w.balance)))
    }
}

impl BalancePort for DbBalancePort {
    async fn credit(
        &self,
        log: &CreditLog,
        entry: Option<&LedgerEntry>,
    ) -> Result<BalanceChange, WalletServiceError> {
        let txn = self.db.begin().await.context("begin credit transaction")?;

        // A concurrent redemption leaves nothing to update.
        let consumed = consume_credit_log(log.id)
            .exec(&txn)
            .await
            .context("consume credit log")?;
        if consumed.rows_affected == 0 {
            return Err(WalletServiceError::InvalidToken);
        }

        let shifted = Self::shift_balance(&txn, log.credited_to, BalanceShift::Credit(log.value))
            .await
            .context("credit wallet balance")?;
        let balance = match shifted {
            Some(balance) => balance,
            None => {
                let exists = wallets::Entity::find_by_id(log.credited_to)
                    .one(&txn)
                    .await
                    .context("find wallet after refused credit")?
                    .is_some();
                return Err(if exists {
                    WalletServiceError::InvalidAmount
                } else {
                    WalletServiceError::WalletNotFound
                });
            }
        };

        if let Some(entry) = entry {
            append_entry(&txn, entry)
                .await
                .context("append credit ledger entry")?;
        }

        txn.commit().await.context("commit credit transaction")?;
        Ok(BalanceChange {
            amount: log.value,
            balance,
        })
    }

    async fn debit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        entry: Option<&LedgerEntry>,
    ) -> Result<BalanceChange, WalletServiceError> {
        let txn = self.db.begin().await.context("begin debit transaction")?;

        let balance = Self::shift_balance(&txn, user_id, BalanceShift::Debit(amount))
            .await
            .context("debit wallet balance")?
            .ok_or(WalletServiceError::InsufficientBalance)?;

        if let Some(entry) = entry {
            append_entry(&txn, entry)
                .await
                .context("append debit ledger entry")?;
        }

        txn.commit().await.context("commit debit transaction")?;
        Ok(BalanceChange {
            amount: to_money(amount),
            balance,
        })
    }
}
