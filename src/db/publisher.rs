use std::collections::{HashMap, HashSet};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    error::AppError,
    publisher::{PublisherRef, PublisherSummary, RPublisherWrite},
};
use entity::article::{self, ArticleStatus, Entity as Article};
use entity::publisher::{ActiveModel as PublisherActive, Entity as Publisher, Model as PublisherModel};
use entity::user::{self, Entity as User, Role};
use entity::user_publisher::{self, ActiveModel as UserPublisherActive, Entity as UserPublisher};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// Outlets every deployment starts with, as (name, join passphrase).
pub const CORE_PUBLISHERS: [(&str, &str); 2] =
    [("ActualToday", "ActualToday"), ("SportToday", "SportToday")];

impl MariaDbService {
    /// Creates the core publishers that are missing. Existing rows are left untouched.
    pub async fn ensure_publishers_exist(&self) -> Result<(), DbErr> {
        for (name, passphrase) in CORE_PUBLISHERS {
            let exists = Publisher::find()
                .filter(entity::publisher::Column::Name.eq(name))
                .count(&self.database_connection)
                .await?
                > 0;
            if exists {
                continue;
            }
            PublisherActive {
                name: Set(name.to_string()),
                description: Set(Some(format!("Core news outlet: {name}"))),
                access_password: Set(passphrase.to_string()),
                ..Default::default()
            }
            .insert(&self.database_connection)
            .await?;
            info!("Created publisher {name}");
        }
        Ok(())
    }

    pub async fn get_publisher(&self, id: i32) -> Result<PublisherModel, AppError> {
        Ok(Publisher::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Publisher does not exist".into()))?)
    }

    pub async fn list_publishers(&self) -> Result<Vec<PublisherModel>, AppError> {
        Ok(Publisher::find()
            .order_by_asc(entity::publisher::Column::Name)
            .all(&self.database_connection)
            .await?)
    }

    /// All publishers keyed by name, for passphrase checks.
    pub async fn publishers_by_name(&self) -> Result<HashMap<String, PublisherModel>, AppError> {
        Ok(self
            .list_publishers()
            .await?
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect())
    }

    pub async fn publisher_ids_for_user(&self, user_id: i32) -> Result<Vec<i32>, AppError> {
        Ok(UserPublisher::find()
            .filter(user_publisher::Column::UserId.eq(user_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|row| row.publisher_id)
            .collect())
    }

    pub async fn publishers_for_user(&self, user_id: i32) -> Result<Vec<PublisherModel>, AppError> {
        let ids = self.publisher_ids_for_user(user_id).await?;
        if ids.is_empty() {
            return Ok(vec![]);
        }
        Ok(Publisher::find()
            .filter(entity::publisher::Column::Id.is_in(ids))
            .order_by_asc(entity::publisher::Column::Name)
            .all(&self.database_connection)
            .await?)
    }

    /// Affiliations for several users at once. Users without any are absent from the map.
    pub async fn publishers_for_users(
        &self,
        user_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<PublisherRef>>, AppError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let links = UserPublisher::find()
            .filter(user_publisher::Column::UserId.is_in(user_ids.to_vec()))
            .all(&self.database_connection)
            .await?;
        let publishers = self.publisher_refs().await?;

        let mut out: HashMap<i32, Vec<PublisherRef>> = HashMap::new();
        for link in links {
            if let Some(p) = publishers.get(&link.publisher_id) {
                out.entry(link.user_id).or_default().push(p.clone());
            }
        }
        for refs in out.values_mut() {
            refs.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(out)
    }

    pub async fn publisher_refs(&self) -> Result<HashMap<i32, PublisherRef>, AppError> {
        Ok(Publisher::find()
            .all(&self.database_connection)
            .await?
            .iter()
            .map(|p| (p.id, PublisherRef::from(p)))
            .collect())
    }

    /// Replaces a user's affiliations. Runs on whatever connection the caller holds,
    /// so it can join a registration or admin transaction.
    pub(crate) async fn set_user_publishers<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        publisher_ids: &[i32],
    ) -> Result<(), DbErr> {
        UserPublisher::delete_many()
            .filter(user_publisher::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        if publisher_ids.is_empty() {
            return Ok(());
        }
        UserPublisher::insert_many(publisher_ids.iter().map(|&publisher_id| UserPublisherActive {
            user_id: Set(user_id),
            publisher_id: Set(publisher_id),
        }))
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }

    pub async fn published_count_for_publisher(&self, publisher_id: i32) -> Result<u64, AppError> {
        Ok(Article::find()
            .filter(article::Column::PublisherId.eq(publisher_id))
            .filter(article::Column::Status.eq(ArticleStatus::Published))
            .count(&self.database_connection)
            .await?)
    }

    /// Journalists affiliated with the publisher. Editors are not counted.
    pub async fn journalist_count_for_publisher(&self, publisher_id: i32) -> Result<u64, AppError> {
        let user_ids: Vec<i32> = UserPublisher::find()
            .filter(user_publisher::Column::PublisherId.eq(publisher_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|row| row.user_id)
            .collect();
        if user_ids.is_empty() {
            return Ok(0);
        }
        Ok(User::find()
            .filter(user::Column::Id.is_in(user_ids))
            .filter(user::Column::Role.eq(Role::Journalist))
            .count(&self.database_connection)
            .await?)
    }

    pub async fn publisher_summary(&self, publisher: PublisherModel) -> Result<PublisherSummary, AppError> {
        let article_count = self.published_count_for_publisher(publisher.id).await?;
        Ok(PublisherSummary {
            id: publisher.id,
            name: publisher.name,
            description: publisher.description,
            article_count,
        })
    }

    /// Sidebar entries for followed publishers, ordered by name.
    pub async fn publisher_summaries(&self, ids: &HashSet<i32>) -> Result<Vec<PublisherSummary>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let publishers = Publisher::find()
            .filter(entity::publisher::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::publisher::Column::Name)
            .all(&self.database_connection)
            .await?;
        let mut out = Vec::with_capacity(publishers.len());
        for publisher in publishers {
            out.push(self.publisher_summary(publisher).await?);
        }
        Ok(out)
    }

    pub async fn create_publisher(&self, payload: RPublisherWrite) -> Result<PublisherModel, AppError> {
        Ok(PublisherActive {
            name: Set(payload.name),
            description: Set(payload.description),
            access_password: Set(payload.access_password),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn update_publisher(
        &self,
        id: i32,
        payload: RPublisherWrite,
    ) -> Result<PublisherModel, AppError> {
        let mut am: PublisherActive = self.get_publisher(id).await?.into();
        am.name = Set(payload.name);
        am.description = Set(payload.description);
        am.access_password = Set(payload.access_password);
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn delete_publisher(&self, id: i32) -> Result<(), AppError> {
        let res = Publisher::delete_by_id(id)
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
