use sea_orm::entity::prelude::*;

/// One user's application of a discount token. Unique per (user_id, token_id).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "token_usages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_id: Uuid,
    pub discount_used: i32,
    pub used_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::discount_tokens::Entity",
        from = "Column::TokenId",
        to = "super::discount_tokens::Column::Id"
    )]
    DiscountToken,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::discount_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiscountToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
