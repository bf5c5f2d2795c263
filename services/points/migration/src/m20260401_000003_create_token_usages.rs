use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TokenUsages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TokenUsages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TokenUsages::UserId).uuid().not_null())
                    .col(ColumnDef::new(TokenUsages::TokenId).uuid().not_null())
                    .col(
                        ColumnDef::new(TokenUsages::DiscountUsed)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(TokenUsages::DiscountUsed).gte(0)),
                    )
                    .col(
                        ColumnDef::new(TokenUsages::UsedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TokenUsages::Table, TokenUsages::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TokenUsages::Table, TokenUsages::TokenId)
                            .to(DiscountTokens::Table, DiscountTokens::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(TokenUsages::Table)
                    .col(TokenUsages::UserId)
                    .col(TokenUsages::TokenId)
                    .unique()
                    .name("idx_token_usages_user_token")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(TokenUsages::Table)
                    .col(TokenUsages::TokenId)
                    .name("idx_token_usages_token_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TokenUsages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TokenUsages {
    Table,
    Id,
    UserId,
    TokenId,
    DiscountUsed,
    UsedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum DiscountTokens {
    Table,
    Id,
}
