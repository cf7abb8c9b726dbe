//! Create `report` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Report::Title).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Report::ReportType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Report::GeneratedBy).integer().not_null())
                    .col(ColumnDef::new(Report::Period).string_len(16).not_null())
                    .col(ColumnDef::new(Report::Data).text().not_null())
                    .col(
                        ColumnDef::new(Report::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_generated_by")
                            .from(Report::Table, Report::GeneratedBy)
                            .to(UserAccount::Table, UserAccount::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: type (for listing by granularity)
        manager
            .create_index(
                Index::create()
                    .name("idx_report_type")
                    .table(Report::Table)
                    .col(Report::ReportType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
    Title,
    ReportType,
    GeneratedBy,
    Period,
    Data,
    CreatedAt,
}

#[derive(Iden)]
enum UserAccount {
    Table,
    Id,
}
