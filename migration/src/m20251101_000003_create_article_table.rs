use sea_orm_migration::prelude::*;

use crate::m20251101_000001_create_publisher_table::Publisher;
use crate::m20251101_000002_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Article {
    Table,
    Id,
    Title,
    Body,
    CreationDate,
    LastEditedDate,
    PublicationDate,
    PublisherId,
    AuthorId,
    EditorId,
    Status,
    IsApproved,
    FeaturedImage,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Article::Table)
                .if_not_exists()
                .col(ColumnDef::new(Article::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Article::Title).string_len(255).not_null())
                .col(ColumnDef::new(Article::Body).text().not_null())
                .col(ColumnDef::new(Article::CreationDate).date_time().not_null())
                .col(ColumnDef::new(Article::LastEditedDate).date_time().not_null())
                .col(ColumnDef::new(Article::PublicationDate).date_time().null())
                .col(ColumnDef::new(Article::PublisherId).integer().null())
                .col(ColumnDef::new(Article::AuthorId).integer().not_null())
                .col(ColumnDef::new(Article::EditorId).integer().null())
                .col(ColumnDef::new(Article::Status).string_len(20).not_null().default("DRAFT"))
                .col(ColumnDef::new(Article::IsApproved).boolean().not_null().default(false))
                .col(ColumnDef::new(Article::FeaturedImage).string_len(255).null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_publisher")
                        .from(Article::Table, Article::PublisherId)
                        .to(Publisher::Table, Publisher::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_author")
                        .from(Article::Table, Article::AuthorId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_editor")
                        .from(Article::Table, Article::EditorId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // Feeds filter on status and sort on publication date
        m.create_index(
            Index::create()
                .name("idx_article_status_pubdate")
                .table(Article::Table)
                .col(Article::Status)
                .col(Article::PublicationDate)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Article::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
