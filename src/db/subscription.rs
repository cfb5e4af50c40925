use std::collections::{BTreeSet, HashSet};

use crate::db::mariadb_service::MariaDbService;
use crate::types::error::AppError;
use chrono::Utc;
use entity::journalist_subscription::{
    self, ActiveModel as JournalistSubActive, Entity as JournalistSub,
};
use entity::publisher_subscription::{
    self, ActiveModel as PublisherSubActive, Entity as PublisherSub,
};
use entity::user::{self, Entity as User};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

impl MariaDbService {
    pub async fn journalist_subscription_ids(&self, reader_id: i32) -> Result<HashSet<i32>, AppError> {
        Ok(JournalistSub::find()
            .filter(journalist_subscription::Column::ReaderId.eq(reader_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|s| s.journalist_id)
            .collect())
    }

    pub async fn publisher_subscription_ids(&self, reader_id: i32) -> Result<HashSet<i32>, AppError> {
        Ok(PublisherSub::find()
            .filter(publisher_subscription::Column::ReaderId.eq(reader_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|s| s.publisher_id)
            .collect())
    }

    pub async fn is_subscribed_to_journalist(&self, reader_id: i32, journalist_id: i32) -> Result<bool, AppError> {
        Ok(JournalistSub::find()
            .filter(journalist_subscription::Column::ReaderId.eq(reader_id))
            .filter(journalist_subscription::Column::JournalistId.eq(journalist_id))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn is_subscribed_to_publisher(&self, reader_id: i32, publisher_id: i32) -> Result<bool, AppError> {
        Ok(PublisherSub::find()
            .filter(publisher_subscription::Column::ReaderId.eq(reader_id))
            .filter(publisher_subscription::Column::PublisherId.eq(publisher_id))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    /// Subscribes when no row exists, unsubscribes otherwise.
    /// Returns whether the reader is subscribed afterwards.
    pub async fn toggle_journalist_subscription(&self, reader_id: i32, journalist_id: i32) -> Result<bool, AppError> {
        let txn = self.database_connection.begin().await?;
        let existing = JournalistSub::find()
            .filter(journalist_subscription::Column::ReaderId.eq(reader_id))
            .filter(journalist_subscription::Column::JournalistId.eq(journalist_id))
            .one(&txn)
            .await?;

        let subscribed = match existing {
            Some(row) => {
                row.delete(&txn).await?;
                false
            }
            None => {
                JournalistSubActive {
                    reader_id: Set(reader_id),
                    journalist_id: Set(journalist_id),
                    date_subscribed: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                true
            }
        };
        txn.commit().await?;
        Ok(subscribed)
    }

    pub async fn toggle_publisher_subscription(&self, reader_id: i32, publisher_id: i32) -> Result<bool, AppError> {
        let txn = self.database_connection.begin().await?;
        let existing = PublisherSub::find()
            .filter(publisher_subscription::Column::ReaderId.eq(reader_id))
            .filter(publisher_subscription::Column::PublisherId.eq(publisher_id))
            .one(&txn)
            .await?;

        let subscribed = match existing {
            Some(row) => {
                row.delete(&txn).await?;
                false
            }
            None => {
                PublisherSubActive {
                    reader_id: Set(reader_id),
                    publisher_id: Set(publisher_id),
                    date_subscribed: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                true
            }
        };
        txn.commit().await?;
        Ok(subscribed)
    }

    pub async fn journalist_subscriber_count(&self, journalist_id: i32) -> Result<u64, AppError> {
        Ok(JournalistSub::find()
            .filter(journalist_subscription::Column::JournalistId.eq(journalist_id))
            .count(&self.database_connection)
            .await?)
    }

    pub async fn publisher_subscriber_count(&self, publisher_id: i32) -> Result<u64, AppError> {
        Ok(PublisherSub::find()
            .filter(publisher_subscription::Column::PublisherId.eq(publisher_id))
            .count(&self.database_connection)
            .await?)
    }

    /// E-mail addresses of readers following the author or the publisher,
    /// de-duplicated and sorted. Blank addresses are skipped.
    pub async fn subscriber_emails(
        &self,
        author_id: i32,
        publisher_id: Option<i32>,
    ) -> Result<Vec<String>, AppError> {
        let mut reader_ids: BTreeSet<i32> = JournalistSub::find()
            .filter(journalist_subscription::Column::JournalistId.eq(author_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|s| s.reader_id)
            .collect();
        if let Some(publisher_id) = publisher_id {
            reader_ids.extend(
                PublisherSub::find()
                    .filter(publisher_subscription::Column::PublisherId.eq(publisher_id))
                    .all(&self.database_connection)
                    .await?
                    .into_iter()
                    .map(|s| s.reader_id),
            );
        }
        if reader_ids.is_empty() {
            return Ok(vec![]);
        }

        let emails: BTreeSet<String> = User::find()
            .filter(user::Column::Id.is_in(reader_ids))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|u| u.email.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Ok(emails.into_iter().collect())
    }
}
