use std::sync::Arc;

use actix_web::{get, post, web};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    error::AppError,
    publisher::PublisherRef,
    response::{ApiResponse, ApiResult},
    user::{RProfileUpdate, UserProfile},
};
use crate::utils::{validation::validate_email, webutils::AuthUser};

async fn load_profile(db: &MariaDbService, user: entity::user::Model) -> Result<UserProfile, AppError> {
    let publishers = db
        .publishers_for_user(user.id)
        .await?
        .iter()
        .map(PublisherRef::from)
        .collect();
    Ok(UserProfile::new(user, publishers))
}

#[get("/profile/")]
pub async fn profile(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
) -> ApiResult<UserProfile> {
    Ok(ApiResponse::Ok(load_profile(&db, auth.0).await?))
}

#[post("/profile/")]
pub async fn update_profile(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    body: web::Json<RProfileUpdate>,
) -> ApiResult<UserProfile> {
    let mut changes = body.into_inner();
    if let Some(email) = changes.email.as_mut() {
        *email = email.trim().to_string();
        if let Some(e) = validate_email(email) {
            return Err(AppError::Validation(e));
        }
    }
    let user = db.update_profile(auth.id(), changes).await?;
    Ok(ApiResponse::Ok(load_profile(&db, user).await?))
}
