//! Create `user_account` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAccount::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAccount::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserAccount::Name)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserAccount::Email)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserAccount::PasswordHash)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserAccount::ProfileId).integer().not_null())
                    .col(
                        ColumnDef::new(UserAccount::PhoneNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserAccount::Age).integer().not_null())
                    .col(
                        ColumnDef::new(UserAccount::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(UserAccount::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_account_profile")
                            .from(UserAccount::Table, UserAccount::ProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: email (for login lookups)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_account_email")
                    .table(UserAccount::Table)
                    .col(UserAccount::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAccount::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserAccount {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    ProfileId,
    PhoneNumber,
    Age,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum UserProfile {
    Table,
    Id,
}
