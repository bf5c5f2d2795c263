use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscountTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscountTokens::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DiscountTokens::Name)
                            .string_len(50)
                            .not_null()
                            .default("PromoToken"),
                    )
                    .col(
                        ColumnDef::new(DiscountTokens::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DiscountTokens::Value)
                            .integer()
                            .not_null()
                            .check(Expr::col(DiscountTokens::Value).gte(0)),
                    )
                    .col(
                        ColumnDef::new(DiscountTokens::RemainingValue)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(DiscountTokens::RemainingValue).gte(0)),
                    )
                    .col(
                        ColumnDef::new(DiscountTokens::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiscountTokens::ValidTo)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiscountTokens::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DiscountTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Case-insensitive lookups filter on LOWER(code).
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_discount_tokens_code_lower \
                 ON discount_tokens (LOWER(code))",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscountTokens::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DiscountTokens {
    Table,
    Id,
    Name,
    Code,
    Value,
    RemainingValue,
    ValidFrom,
    ValidTo,
    Active,
    CreatedAt,
}
