use sea_orm::entity::prelude::*;

/// Discount token worth a number of points, redeemable inside its validity window.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "discount_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    /// Points granted at issuance.
    pub value: i32,
    /// Points not yet drawn by checkouts. Never negative.
    pub remaining_value: i32,
    pub valid_from: chrono::DateTime<chrono::Utc>,
    pub valid_to: chrono::DateTime<chrono::Utc>,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::token_usages::Entity")]
    TokenUsages,
}

impl Related<super::token_usages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenUsages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
