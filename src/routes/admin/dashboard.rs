use std::sync::Arc;

use actix_web::{get, web};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    admin::AdminIndex,
    response::{ApiResponse, ApiResult},
};

#[get("/")]
pub async fn index(db: web::Data<Arc<MariaDbService>>) -> ApiResult<AdminIndex> {
    Ok(ApiResponse::Ok(AdminIndex {
        users: db.user_count().await?,
        publishers: db.list_publishers().await?.len() as u64,
        articles: db.article_count().await?,
        articles_by_status: db.article_counts_by_status().await?,
    }))
}
