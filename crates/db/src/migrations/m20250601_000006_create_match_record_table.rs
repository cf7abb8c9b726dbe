//! Create `match_record` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MatchRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchRecord::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MatchRecord::RequestId).integer().not_null())
                    .col(ColumnDef::new(MatchRecord::CsrId).integer().not_null())
                    .col(ColumnDef::new(MatchRecord::PinId).integer().not_null())
                    .col(
                        ColumnDef::new(MatchRecord::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchRecord::Status)
                            .string_len(16)
                            .not_null()
                            .default("completed"),
                    )
                    .col(
                        ColumnDef::new(MatchRecord::MatchedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchRecord::CompletedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_record_request")
                            .from(MatchRecord::Table, MatchRecord::RequestId)
                            .to(Request::Table, Request::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_record_category")
                            .from(MatchRecord::Table, MatchRecord::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: completed_at (for the rolling 30-day match count)
        manager
            .create_index(
                Index::create()
                    .name("idx_match_record_completed_at")
                    .table(MatchRecord::Table)
                    .col(MatchRecord::CompletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MatchRecord::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MatchRecord {
    Table,
    Id,
    RequestId,
    CsrId,
    PinId,
    CategoryId,
    Status,
    MatchedAt,
    CompletedAt,
}

#[derive(Iden)]
enum Request {
    Table,
    Id,
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
}
