use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, Order,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait, UpdateMany, sea_query::Expr,
};
use uuid::Uuid;

use loyalty_core::sea_ext::{ColumnExt, is_unique_violation};
use loyalty_domain::pagination::{PageRequest, Sort};
use loyalty_points_schema::{discount_tokens, token_usages, users};

use crate::domain::repository::{RedeemPort, TokenRepository, UsageRepository, UserRepository};
use crate::domain::types::{
    DiscountToken, HistorySortBy, PointsUser, TokenUsage, UsageHistoryEntry,
};
use crate::error::PointsServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PointsUser>, PointsServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &PointsUser) -> Result<(), PointsServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(PointsServiceError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }
}

fn user_from_model(model: users::Model) -> PointsUser {
    PointsUser {
        id: model.id,
        username: model.username,
        email: model.email,
        created_at: model.created_at,
    }
}

// ── Token repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTokenRepository {
    pub db: DatabaseConnection,
}

impl TokenRepository for DbTokenRepository {
    async fn find_redeemable_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DiscountToken>, PointsServiceError> {
        let model = discount_tokens::Entity::find()
            .filter(discount_tokens::Column::Code.eq_ignore_case(code))
            .filter(discount_tokens::Column::Active.eq(true))
            .filter(discount_tokens::Column::ValidFrom.lte(now))
            .filter(discount_tokens::Column::ValidTo.gte(now))
            .one(&self.db)
            .await
            .context("find redeemable token by code")?;
        Ok(model.map(token_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DiscountToken>, PointsServiceError> {
        let model = discount_tokens::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find token by id")?;
        Ok(model.map(token_from_model))
    }

    async fn create(&self, token: &DiscountToken) -> Result<(), PointsServiceError> {
        let result = discount_tokens::ActiveModel {
            id: Set(token.id),
            name: Set(token.name.clone()),
            code: Set(token.code.clone()),
            value: Set(token.value),
            remaining_value: Set(token.remaining_value),
            valid_from: Set(token.valid_from),
            valid_to: Set(token.valid_to),
            active: Set(token.active),
            created_at: Set(token.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(PointsServiceError::TokenAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create token").into()),
        }
    }
}

fn token_from_model(model: discount_tokens::Model) -> DiscountToken {
    DiscountToken {
        id: model.id,
        name: model.name,
        code: model.code,
        value: model.value,
        remaining_value: model.remaining_value,
        valid_from: model.valid_from,
        valid_to: model.valid_to,
        active: model.active,
        created_at: model.created_at,
    }
}

// ── Usage repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUsageRepository {
    pub db: DatabaseConnection,
}

impl UsageRepository for DbUsageRepository {
    async fn find(
        &self,
        user_id: Uuid,
        token_id: Uuid,
    ) -> Result<Option<TokenUsage>, PointsServiceError> {
        let model = token_usages::Entity::find()
            .filter(token_usages::Column::UserId.eq(user_id))
            .filter(token_usages::Column::TokenId.eq(token_id))
            .one(&self.db)
            .await
            .context("find token usage")?;
        Ok(model.map(usage_from_model))
    }

    async fn create(&self, usage: &TokenUsage) -> Result<(), PointsServiceError> {
        let result = token_usages::ActiveModel {
            id: Set(usage.id),
            user_id: Set(usage.user_id),
            token_id: Set(usage.token_id),
            discount_used: Set(usage.discount_used),
            used_at: Set(usage.used_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(PointsServiceError::TokenAlreadyUsed),
            Err(e) => Err(anyhow::Error::new(e).context("create token usage").into()),
        }
    }

    async fn list_history(
        &self,
        user_id: Uuid,
        sort_by: HistorySortBy,
        page: PageRequest,
    ) -> Result<Vec<UsageHistoryEntry>, PointsServiceError> {
        let order = match sort_by {
            HistorySortBy::UsedAt(Sort::Desc) => Order::Desc,
            HistorySortBy::UsedAt(Sort::Asc) => Order::Asc,
        };
        let rows = token_usages::Entity::find()
            .find_also_related(discount_tokens::Entity)
            .filter(token_usages::Column::UserId.eq(user_id))
            .order_by(token_usages::Column::UsedAt, order.clone())
            .order_by(token_usages::Column::Id, order)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list token usage history")?;

        // The foreign key guarantees the token; a missing one means a concurrent delete.
        Ok(rows
            .into_iter()
            .filter_map(|(usage, token)| {
                token.map(|token| UsageHistoryEntry {
                    usage: usage_from_model(usage),
                    token: token_from_model(token),
                })
            })
            .collect())
    }
}

fn usage_from_model(model: token_usages::Model) -> TokenUsage {
    TokenUsage {
        id: model.id,
        user_id: model.user_id,
        token_id: model.token_id,
        discount_used: model.discount_used,
        used_at: model.used_at,
    }
}

// ── Redeem port ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRedeemPort {
    pub db: DatabaseConnection,
}

/// Lower the remaining value only while it still covers `discount`.
fn draw_remaining_value(token_id: Uuid, discount: i32) -> UpdateMany<discount_tokens::Entity> {
    discount_tokens::Entity::update_many()
        .col_expr(
            discount_tokens::Column::RemainingValue,
            Expr::col(discount_tokens::Column::RemainingValue).sub(discount),
        )
        .filter(discount_tokens::Column::Id.eq(token_id))
        .filter(discount_tokens::Column::RemainingValue.gte(discount))
}

/// Only this user's usage row is booked.
fn book_discount(user_id: Uuid, token_id: Uuid, discount: i32) -> UpdateMany<token_usages::Entity> {
    token_usages::Entity::update_many()
        .col_expr(
            token_usages::Column::DiscountUsed,
            Expr::col(token_usages::Column::DiscountUsed).add(discount),
        )
        .filter(token_usages::Column::UserId.eq(user_id))
        .filter(token_usages::Column::TokenId.eq(token_id))
}

impl RedeemPort for DbRedeemPort {
    async fn redeem(
        &self,
        user_id: Uuid,
        token_id: Uuid,
        discount: i32,
    ) -> Result<(), PointsServiceError> {
        let txn = self.db.begin().await.context("begin redeem transaction")?;

        let drawn = draw_remaining_value(token_id, discount)
            .exec(&txn)
            .await
            .context("draw token remaining value")?;
        if drawn.rows_affected == 0 {
            return Err(PointsServiceError::Conflict);
        }

        let booked = book_discount(user_id, token_id, discount)
            .exec(&txn)
            .await
            .context("book discount on token usage")?;
        if booked.rows_affected == 0 {
            return Err(PointsServiceError::TokenNotApplied);
        }

        txn.commit().await.context("commit redeem transaction")?;
        Ok(())
    }
}
