use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TokenCreditLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TokenCreditLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TokenCreditLogs::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TokenCreditLogs::Value)
                            .decimal_len(10, 2)
                            .not_null()
                            .check(Expr::col(TokenCreditLogs::Value).gt(0)),
                    )
                    .col(ColumnDef::new(TokenCreditLogs::CreditedTo).uuid().not_null())
                    .col(
                        ColumnDef::new(TokenCreditLogs::CreditedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TokenCreditLogs::Expiry)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TokenCreditLogs::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TokenCreditLogs::Table, TokenCreditLogs::CreditedTo)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(TokenCreditLogs::Table)
                    .col(TokenCreditLogs::CreditedTo)
                    .name("idx_token_credit_logs_credited_to")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TokenCreditLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TokenCreditLogs {
    Table,
    Id,
    Code,
    Value,
    CreditedTo,
    CreditedAt,
    Expiry,
    Used,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
