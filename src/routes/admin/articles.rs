use std::sync::Arc;

use actix_web::{get, web};
use tracing::info;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    article::{ArticleView, RArticleFilter},
    response::{ApiResponse, ApiResult},
};
use crate::utils::webutils::AuthUser;

#[get("/articles/")]
pub async fn list(
    db: web::Data<Arc<MariaDbService>>,
    filter: web::Query<RArticleFilter>,
) -> ApiResult<Vec<ArticleView>> {
    let articles = db.list_articles(filter.into_inner().status).await?;
    Ok(ApiResponse::Ok(db.article_views(articles).await?))
}

#[actix_web::delete("/articles/{id}/")]
pub async fn delete(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<()> {
    let id = path.into_inner();
    db.delete_article(id).await?;
    info!("{} deleted article {id} from admin", auth.user().username);
    Ok(ApiResponse::NoContent)
}
