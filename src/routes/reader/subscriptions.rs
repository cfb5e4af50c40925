use std::sync::Arc;

use actix_web::{get, web};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    response::{ApiResponse, ApiResult},
    subscription::ManageSubscriptions,
};
use crate::utils::webutils::AuthUser;

#[get("/subscriptions/manage/")]
pub async fn manage(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
) -> ApiResult<ManageSubscriptions> {
    let journalists = db.journalist_subscription_ids(auth.id()).await?;
    let publishers = db.publisher_subscription_ids(auth.id()).await?;
    Ok(ApiResponse::Ok(ManageSubscriptions {
        journalists: db.journalist_summaries(&journalists).await?,
        publishers: db.publisher_summaries(&publishers).await?,
    }))
}
