use sea_orm_migration::prelude::*;

use crate::m20251101_000001_create_publisher_table::Publisher;
use crate::m20251101_000002_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum PublisherSubscription {
    Table,
    Id,
    ReaderId,
    PublisherId,
    DateSubscribed,
}

#[derive(DeriveIden)]
enum JournalistSubscription {
    Table,
    Id,
    ReaderId,
    JournalistId,
    DateSubscribed,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(PublisherSubscription::Table)
                .if_not_exists()
                .col(ColumnDef::new(PublisherSubscription::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(PublisherSubscription::ReaderId).integer().not_null())
                .col(ColumnDef::new(PublisherSubscription::PublisherId).integer().not_null())
                .col(ColumnDef::new(PublisherSubscription::DateSubscribed).date_time().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pub_sub_reader")
                        .from(PublisherSubscription::Table, PublisherSubscription::ReaderId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pub_sub_publisher")
                        .from(PublisherSubscription::Table, PublisherSubscription::PublisherId)
                        .to(Publisher::Table, Publisher::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("uk_pub_sub_reader_publisher")
                .table(PublisherSubscription::Table)
                .col(PublisherSubscription::ReaderId)
                .col(PublisherSubscription::PublisherId)
                .unique()
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(JournalistSubscription::Table)
                .if_not_exists()
                .col(ColumnDef::new(JournalistSubscription::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(JournalistSubscription::ReaderId).integer().not_null())
                .col(ColumnDef::new(JournalistSubscription::JournalistId).integer().not_null())
                .col(ColumnDef::new(JournalistSubscription::DateSubscribed).date_time().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_jour_sub_reader")
                        .from(JournalistSubscription::Table, JournalistSubscription::ReaderId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_jour_sub_journalist")
                        .from(JournalistSubscription::Table, JournalistSubscription::JournalistId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("uk_jour_sub_reader_journalist")
                .table(JournalistSubscription::Table)
                .col(JournalistSubscription::ReaderId)
                .col(JournalistSubscription::JournalistId)
                .unique()
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(JournalistSubscription::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(PublisherSubscription::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
