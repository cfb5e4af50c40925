use std::sync::Arc;

use actix_web::{get, web};
use entity::{article::ArticleStatus, user::Role};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    article::{ArticleListEntry, ArticleReaderRes},
    error::AppError,
    permission::Permission,
    response::{ApiResponse, ApiResult},
};
use crate::utils::webutils::AuthUser;

const MORE_FROM_AUTHOR: u64 = 3;

/// Every published article. Signed-in callers also get their subscription flags.
#[get("/articles/")]
pub async fn article_list(
    db: web::Data<Arc<MariaDbService>>,
    auth: Option<AuthUser>,
) -> ApiResult<Vec<ArticleListEntry>> {
    let articles = db.article_views(db.published_articles().await?).await?;

    let Some(auth) = auth else {
        return Ok(ApiResponse::Ok(
            articles
                .into_iter()
                .map(|article| ArticleListEntry { article, is_subbed_j: None, is_subbed_p: None })
                .collect(),
        ));
    };

    let journalists = db.journalist_subscription_ids(auth.id()).await?;
    let publishers = db.publisher_subscription_ids(auth.id()).await?;
    Ok(ApiResponse::Ok(
        articles
            .into_iter()
            .map(|article| {
                let is_subbed_j = journalists.contains(&article.author.id);
                let is_subbed_p = article
                    .publisher
                    .as_ref()
                    .is_some_and(|p| publishers.contains(&p.id));
                ArticleListEntry {
                    article,
                    is_subbed_j: Some(is_subbed_j),
                    is_subbed_p: Some(is_subbed_p),
                }
            })
            .collect(),
    ))
}

#[get("/article/{pk:\\d+}/")]
pub async fn article_reader(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<ArticleReaderRes> {
    let reader = auth.require_role(Role::Reader)?;
    auth.require(Permission::ViewArticle)?;

    let article = db.get_article(path.into_inner()).await?;
    if article.status != ArticleStatus::Published {
        return Err(AppError::Missing(
            "This article is not yet available for reading.".to_string(),
        ));
    }

    let is_subscribed = db.is_subscribed_to_journalist(reader.id, article.author_id).await?;
    let more = db
        .published_by_author(article.author_id, Some(article.id), Some(MORE_FROM_AUTHOR))
        .await?;

    Ok(ApiResponse::Ok(ArticleReaderRes {
        article: db.article_view(article).await?,
        is_subscribed,
        more_articles: db.article_views(more).await?,
    }))
}
