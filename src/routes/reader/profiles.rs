use std::sync::Arc;

use actix_web::{get, web};
use entity::user::Role;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    publisher::PublisherProfile,
    response::{ApiResponse, ApiResult},
    user::JournalistProfile,
};
use crate::utils::webutils::AuthUser;

#[get("/journalist/{pk:\\d+}/")]
pub async fn journalist_profile(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<JournalistProfile> {
    let reader = auth.require_role(Role::Reader)?;
    let journalist = db.get_journalist(path.into_inner()).await?;

    let published = db.published_by_author(journalist.id, None, None).await?;
    let is_subscribed = db.is_subscribed_to_journalist(reader.id, journalist.id).await?;
    let subscriber_count = db.journalist_subscriber_count(journalist.id).await?;

    Ok(ApiResponse::Ok(JournalistProfile {
        journalist: db.journalist_summary(journalist).await?,
        subscriber_count,
        is_subscribed,
        published_articles: db.article_views(published).await?,
    }))
}

#[get("/publisher/{pk:\\d+}/")]
pub async fn publisher_profile(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<PublisherProfile> {
    let reader = auth.require_role(Role::Reader)?;
    let publisher = db.get_publisher(path.into_inner()).await?;

    let published = db.published_by_publisher(publisher.id).await?;
    let journalist_count = db.journalist_count_for_publisher(publisher.id).await?;
    let subscriber_count = db.publisher_subscriber_count(publisher.id).await?;
    let is_subscribed = db.is_subscribed_to_publisher(reader.id, publisher.id).await?;

    Ok(ApiResponse::Ok(PublisherProfile {
        publisher: db.publisher_summary(publisher).await?,
        journalist_count,
        subscriber_count,
        is_subscribed,
        published_articles: db.article_views(published).await?,
    }))
}
