//! Create `request` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Request::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Request::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Request::PinId).integer().not_null())
                    .col(ColumnDef::new(Request::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Request::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Request::Description).text().not_null())
                    .col(
                        ColumnDef::new(Request::Status)
                            .string_len(16)
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(Request::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Request::ShortlistCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Request::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Request::ClosedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_pin")
                            .from(Request::Table, Request::PinId)
                            .to(UserAccount::Table, UserAccount::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_category")
                            .from(Request::Table, Request::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: status (for open/closed counts)
        manager
            .create_index(
                Index::create()
                    .name("idx_request_status")
                    .table(Request::Table)
                    .col(Request::Status)
                    .to_owned(),
            )
            .await?;

        // Index: category (for per-category breakdowns)
        manager
            .create_index(
                Index::create()
                    .name("idx_request_category")
                    .table(Request::Table)
                    .col(Request::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Request::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Request {
    Table,
    Id,
    PinId,
    CategoryId,
    Title,
    Description,
    Status,
    ViewCount,
    ShortlistCount,
    CreatedAt,
    ClosedAt,
}

#[derive(Iden)]
enum UserAccount {
    Table,
    Id,
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
}
