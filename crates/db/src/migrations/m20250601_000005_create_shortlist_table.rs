//! Create `shortlist` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shortlist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shortlist::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Shortlist::CsrId).integer().not_null())
                    .col(ColumnDef::new(Shortlist::RequestId).integer().not_null())
                    .col(
                        ColumnDef::new(Shortlist::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shortlist_csr")
                            .from(Shortlist::Table, Shortlist::CsrId)
                            .to(UserAccount::Table, UserAccount::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shortlist_request")
                            .from(Shortlist::Table, Shortlist::RequestId)
                            .to(Request::Table, Request::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: request (for per-request shortlist lookups)
        manager
            .create_index(
                Index::create()
                    .name("idx_shortlist_request")
                    .table(Shortlist::Table)
                    .col(Shortlist::RequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shortlist::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Shortlist {
    Table,
    Id,
    CsrId,
    RequestId,
    CreatedAt,
}

#[derive(Iden)]
enum UserAccount {
    Table,
    Id,
}

#[derive(Iden)]
enum Request {
    Table,
    Id,
}
