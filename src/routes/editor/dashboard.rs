use std::sync::Arc;

use actix_web::{get, web};
use entity::user::Role;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    article::EditorDashboard,
    publisher::PublisherRef,
    response::{ApiResponse, ApiResult},
};
use crate::utils::webutils::AuthUser;

#[get("/editor/dashboard/")]
pub async fn dashboard(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
) -> ApiResult<EditorDashboard> {
    let editor = auth.require_role(Role::Editor)?;
    let publishers = db.publishers_for_user(editor.id).await?;
    let ids: Vec<i32> = publishers.iter().map(|p| p.id).collect();
    let queue = db.awaiting_review_for(&ids).await?;

    Ok(ApiResponse::Ok(EditorDashboard {
        articles_to_review: db.article_views(queue).await?,
        publishers: publishers.iter().map(PublisherRef::from).collect(),
    }))
}
