use sea_orm_migration::prelude::*;

use crate::m20251101_000001_create_publisher_table::Publisher;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum User {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    Password,
    Role,
    ProfilePhoto,
    IsStaff,
    IsSuperuser,
    IsActive,
    TokenHash,
    DateJoined,
    LastLogin,
}

#[derive(DeriveIden)]
enum UserPublisher {
    Table,
    UserId,
    PublisherId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(User::Table)
                .if_not_exists()
                .col(ColumnDef::new(User::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(User::Username).string_len(150).not_null().unique_key())
                .col(ColumnDef::new(User::Email).string_len(254).not_null())
                .col(ColumnDef::new(User::FirstName).string_len(150).not_null().default(""))
                .col(ColumnDef::new(User::LastName).string_len(150).not_null().default(""))
                .col(ColumnDef::new(User::Password).string_len(255).not_null())
                .col(ColumnDef::new(User::Role).string_len(10).not_null().default("READER"))
                .col(ColumnDef::new(User::ProfilePhoto).string_len(255).null())
                .col(ColumnDef::new(User::IsStaff).boolean().not_null().default(false))
                .col(ColumnDef::new(User::IsSuperuser).boolean().not_null().default(false))
                .col(ColumnDef::new(User::IsActive).boolean().not_null().default(true))
                .col(ColumnDef::new(User::TokenHash).string_len(255).null())
                .col(ColumnDef::new(User::DateJoined).date_time().not_null())
                .col(ColumnDef::new(User::LastLogin).date_time().null())
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_user_email")
                .table(User::Table)
                .col(User::Email)
                .to_owned(),
        ).await?;

        // Staff affiliation, many journalists/editors per publisher
        m.create_table(
            Table::create()
                .table(UserPublisher::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserPublisher::UserId).integer().not_null())
                .col(ColumnDef::new(UserPublisher::PublisherId).integer().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_user_publisher")
                        .col(UserPublisher::UserId)
                        .col(UserPublisher::PublisherId)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_publisher_user")
                        .from(UserPublisher::Table, UserPublisher::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_publisher_publisher")
                        .from(UserPublisher::Table, UserPublisher::PublisherId)
                        .to(Publisher::Table, Publisher::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(UserPublisher::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(User::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
