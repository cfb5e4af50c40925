use std::collections::{BTreeMap, HashSet};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    article::{ArticleView, AuthorRef},
    error::AppError,
};
use chrono::Utc;
use entity::article::{
    ActiveModel as ArticleActive, ArticleStatus, Column, Entity as Article, Model as ArticleModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Content fields shared by create, edit and editor review.
#[derive(Debug, Clone, Default)]
pub struct ArticleContent {
    pub title: String,
    pub body: String,
    pub featured_image: Option<String>,
}

impl MariaDbService {
    pub async fn get_article(&self, id: i32) -> Result<ArticleModel, AppError> {
        Ok(Article::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Article does not exist".into()))?)
    }

    pub async fn insert_article(
        &self,
        author_id: i32,
        content: ArticleContent,
        status: ArticleStatus,
        publisher_id: Option<i32>,
    ) -> Result<ArticleModel, AppError> {
        Ok(ArticleActive {
            title: Set(content.title),
            body: Set(content.body),
            featured_image: Set(content.featured_image),
            author_id: Set(author_id),
            publisher_id: Set(publisher_id),
            editor_id: Set(None),
            status: Set(status),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    /// Journalist save of an existing article.
    pub async fn update_article(
        &self,
        article: ArticleModel,
        content: ArticleContent,
        status: ArticleStatus,
        publisher_id: Option<i32>,
    ) -> Result<ArticleModel, AppError> {
        let mut am: ArticleActive = article.into();
        am.title = Set(content.title);
        am.body = Set(content.body);
        am.featured_image = Set(content.featured_image);
        am.status = Set(status);
        am.publisher_id = Set(publisher_id);
        Ok(am.update(&self.database_connection).await?)
    }

    /// Editor save. Content edits are optional, the editor is always recorded.
    /// Publishing stamps a fresh publication date.
    pub async fn review_article(
        &self,
        article: ArticleModel,
        editor_id: i32,
        title: Option<String>,
        body: Option<String>,
        featured_image: Option<String>,
        status: Option<ArticleStatus>,
    ) -> Result<ArticleModel, AppError> {
        let mut am: ArticleActive = article.into();
        if let Some(title) = title {
            am.title = Set(title);
        }
        if let Some(body) = body {
            am.body = Set(body);
        }
        if let Some(image) = featured_image {
            am.featured_image = Set(Some(image).filter(|i| !i.is_empty()));
        }
        if let Some(status) = status {
            if status == ArticleStatus::Published {
                am.publication_date = Set(Some(Utc::now()));
            }
            am.status = Set(status);
        }
        am.editor_id = Set(Some(editor_id));
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn delete_article(&self, id: i32) -> Result<(), AppError> {
        let res = Article::delete_by_id(id)
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn published_articles(&self) -> Result<Vec<ArticleModel>, AppError> {
        Ok(Article::find()
            .filter(Column::Status.eq(ArticleStatus::Published))
            .order_by_desc(Column::PublicationDate)
            .order_by_desc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn published_by_author(
        &self,
        author_id: i32,
        exclude: Option<i32>,
        limit: Option<u64>,
    ) -> Result<Vec<ArticleModel>, AppError> {
        let mut query = Article::find()
            .filter(Column::AuthorId.eq(author_id))
            .filter(Column::Status.eq(ArticleStatus::Published));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query
            .order_by_desc(Column::PublicationDate)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn published_by_publisher(&self, publisher_id: i32) -> Result<Vec<ArticleModel>, AppError> {
        Ok(Article::find()
            .filter(Column::PublisherId.eq(publisher_id))
            .filter(Column::Status.eq(ArticleStatus::Published))
            .order_by_desc(Column::PublicationDate)
            .order_by_desc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn published_count_for_author(&self, author_id: i32) -> Result<u64, AppError> {
        Ok(Article::find()
            .filter(Column::AuthorId.eq(author_id))
            .filter(Column::Status.eq(ArticleStatus::Published))
            .count(&self.database_connection)
            .await?)
    }

    pub async fn articles_by_author(&self, author_id: i32) -> Result<Vec<ArticleModel>, AppError> {
        Ok(Article::find()
            .filter(Column::AuthorId.eq(author_id))
            .order_by_desc(Column::LastEditedDate)
            .order_by_desc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    /// Review queue for an editor's publishers, newest submission first.
    pub async fn awaiting_review_for(&self, publisher_ids: &[i32]) -> Result<Vec<ArticleModel>, AppError> {
        if publisher_ids.is_empty() {
            return Ok(vec![]);
        }
        Ok(Article::find()
            .filter(Column::Status.eq(ArticleStatus::AwaitingReview))
            .filter(Column::PublisherId.is_in(publisher_ids.to_vec()))
            .order_by_desc(Column::CreationDate)
            .order_by_desc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    /// Published articles by a followed journalist OR from a followed publisher.
    pub async fn subscribed_articles(
        &self,
        journalists: &HashSet<i32>,
        publishers: &HashSet<i32>,
    ) -> Result<Vec<ArticleModel>, AppError> {
        if journalists.is_empty() && publishers.is_empty() {
            return Ok(vec![]);
        }
        let mut any = Condition::any();
        if !journalists.is_empty() {
            any = any.add(Column::AuthorId.is_in(journalists.iter().copied()));
        }
        if !publishers.is_empty() {
            any = any.add(Column::PublisherId.is_in(publishers.iter().copied()));
        }
        Ok(Article::find()
            .filter(Column::Status.eq(ArticleStatus::Published))
            .filter(any)
            .order_by_desc(Column::PublicationDate)
            .order_by_desc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_articles(&self, status: Option<ArticleStatus>) -> Result<Vec<ArticleModel>, AppError> {
        let mut query = Article::find();
        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }
        Ok(query
            .order_by_desc(Column::LastEditedDate)
            .order_by_desc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn article_count(&self) -> Result<u64, AppError> {
        Ok(Article::find().count(&self.database_connection).await?)
    }

    pub async fn article_counts_by_status(&self) -> Result<BTreeMap<String, u64>, AppError> {
        let mut counts = BTreeMap::new();
        for status in [
            ArticleStatus::Draft,
            ArticleStatus::AwaitingReview,
            ArticleStatus::Rejected,
            ArticleStatus::Published,
        ] {
            let n = Article::find()
                .filter(Column::Status.eq(status))
                .count(&self.database_connection)
                .await?;
            counts.insert(status.as_str().to_string(), n);
        }
        Ok(counts)
    }

    /// Attaches author and publisher references, keeping the input order.
    pub async fn article_views(&self, articles: Vec<ArticleModel>) -> Result<Vec<ArticleView>, AppError> {
        let author_ids: Vec<i32> = articles
            .iter()
            .map(|a| a.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let authors = self.users_by_ids(&author_ids).await?;
        let publishers = self.publisher_refs().await?;

        articles
            .into_iter()
            .map(|a| {
                let author = authors
                    .get(&a.author_id)
                    .map(AuthorRef::from)
                    .ok_or_else(|| AppError::Internal(format!("article {} has no author", a.id)))?;
                let publisher = a.publisher_id.and_then(|p| publishers.get(&p).cloned());
                Ok(ArticleView::new(a, author, publisher))
            })
            .collect()
    }

    pub async fn article_view(&self, article: ArticleModel) -> Result<ArticleView, AppError> {
        self.article_views(vec![article])
            .await?
            .pop()
            .ok_or(AppError::NotFound)
    }
}
