use std::sync::Arc;

use actix_web::{get, web};
use entity::user::Role;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    article::ReaderHome,
    response::{ApiResponse, ApiResult},
};
use crate::utils::{webutils::AuthUser, workflow::split_feed};

/// Subscribed feed first, then everything else that is published.
#[get("/")]
pub async fn home(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
) -> ApiResult<ReaderHome> {
    let reader = auth.require_role(Role::Reader)?;
    let journalists = db.journalist_subscription_ids(reader.id).await?;
    let publishers = db.publisher_subscription_ids(reader.id).await?;

    let (subscribed, general) = split_feed(db.published_articles().await?, &journalists, &publishers);
    let subscribed_feed = db.article_views(subscribed).await?;
    let general_feed = db.article_views(general).await?;
    let article_feed = subscribed_feed
        .iter()
        .chain(general_feed.iter())
        .cloned()
        .collect();

    Ok(ApiResponse::Ok(ReaderHome {
        subscribed_feed,
        general_feed,
        article_feed,
        journalist_subs: db.journalist_summaries(&journalists).await?,
        publisher_subs: db.publisher_summaries(&publishers).await?,
    }))
}
