use std::sync::Arc;

use actix_web::{get, web};
use entity::{article::ArticleStatus, user::Role};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    article::{ArticleView, JournalistDashboard},
    publisher::PublisherRef,
    response::{ApiResponse, ApiResult},
};
use crate::utils::webutils::AuthUser;

fn with_status(articles: &[ArticleView], status: ArticleStatus) -> Vec<ArticleView> {
    articles.iter().filter(|a| a.status == status).cloned().collect()
}

#[get("/journalist/dashboard/")]
pub async fn dashboard(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
) -> ApiResult<JournalistDashboard> {
    let journalist = auth.require_role(Role::Journalist)?;
    let articles = db.article_views(db.articles_by_author(journalist.id).await?).await?;
    let affiliated_publishers = db
        .publishers_for_user(journalist.id)
        .await?
        .iter()
        .map(PublisherRef::from)
        .collect();

    Ok(ApiResponse::Ok(JournalistDashboard {
        drafts: with_status(&articles, ArticleStatus::Draft),
        awaiting_review: with_status(&articles, ArticleStatus::AwaitingReview),
        published: with_status(&articles, ArticleStatus::Published),
        rejected: with_status(&articles, ArticleStatus::Rejected),
        journalist_articles: articles,
        affiliated_publishers,
    }))
}
