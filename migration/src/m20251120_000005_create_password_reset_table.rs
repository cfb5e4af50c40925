use sea_orm_migration::prelude::*;

use crate::m20251101_000002_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum PasswordReset {
    Table,
    Id,
    UserId,
    Used,
    ExpiresAt,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(PasswordReset::Table)
                .if_not_exists()
                .col(ColumnDef::new(PasswordReset::Id).string_len(32).not_null().primary_key())
                .col(ColumnDef::new(PasswordReset::UserId).integer().not_null())
                .col(ColumnDef::new(PasswordReset::Used).boolean().not_null().default(false))
                .col(ColumnDef::new(PasswordReset::ExpiresAt).date_time().not_null())
                .col(ColumnDef::new(PasswordReset::CreatedAt).date_time().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_password_reset_user")
                        .from(PasswordReset::Table, PasswordReset::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;
        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(PasswordReset::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
