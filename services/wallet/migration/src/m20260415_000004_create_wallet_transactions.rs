use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WalletTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WalletTransactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WalletTransactions::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(WalletTransactions::Amount)
                            .decimal_len(10, 2)
                            .not_null()
                            .check(Expr::col(WalletTransactions::Amount).gt(0)),
                    )
                    .col(
                        ColumnDef::new(WalletTransactions::Kind)
                            .string_len(6)
                            .not_null()
                            .check(Expr::col(WalletTransactions::Kind).is_in(["credit", "debit"])),
                    )
                    .col(
                        ColumnDef::new(WalletTransactions::Reason)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WalletTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(WalletTransactions::Table, WalletTransactions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(WalletTransactions::Table)
                    .col(WalletTransactions::UserId)
                    .col(WalletTransactions::CreatedAt)
                    .name("idx_wallet_transactions_user_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WalletTransactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WalletTransactions {
    Table,
    Id,
    UserId,
    Amount,
    Kind,
    Reason,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
