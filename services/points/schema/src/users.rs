use sea_orm::entity::prelude::*;

/// Shopper known to the points service, mirrored from the gateway identity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
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
