use std::sync::Arc;

use actix_web::{get, web, HttpRequest};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    article::{ApiArticle, ApiJournalist},
    error::AppError,
    response::{ApiResponse, ApiResult},
};
use crate::utils::webutils::{absolute_url, AuthUser};

/// Published articles from the caller's followed journalists or publishers.
/// Accepts token or basic credentials.
#[get("/articles/")]
pub async fn articles(
    req: HttpRequest,
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
) -> ApiResult<Vec<ApiArticle>> {
    let journalists = db.journalist_subscription_ids(auth.id()).await?;
    let publishers = db.publisher_subscription_ids(auth.id()).await?;
    let articles = db.subscribed_articles(&journalists, &publishers).await?;

    let mut author_ids: Vec<i32> = articles.iter().map(|a| a.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let authors = db.users_by_ids(&author_ids).await?;
    let affiliations = db.publishers_for_users(&author_ids).await?;
    let publisher_refs = db.publisher_refs().await?;

    let items = articles
        .into_iter()
        .map(|a| {
            let author = authors
                .get(&a.author_id)
                .ok_or_else(|| AppError::Internal(format!("article {} has no author", a.id)))?;
            Ok(ApiArticle {
                id: a.id,
                article_url: absolute_url(&req, &format!("/article/{}/", a.id)),
                title: a.title,
                body: a.body,
                publication_date: a.publication_date,
                featured_image: a.featured_image,
                author: ApiJournalist {
                    id: author.id,
                    username: author.username.clone(),
                    first_name: author.first_name.clone(),
                    last_name: author.last_name.clone(),
                    publishers: affiliations.get(&author.id).cloned().unwrap_or_default(),
                    profile_photo: author.profile_photo.clone(),
                },
                publisher: a.publisher_id.and_then(|p| publisher_refs.get(&p).cloned()),
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(ApiResponse::Ok(items))
}
