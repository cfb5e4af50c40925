use std::sync::Arc;

use actix_web::{post, web};
use tracing::{info, warn};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    error::AppError,
    response::{ApiResponse, ApiResult},
    user::{LoginRes, RLogin},
};

#[post("/admin/login/")]
pub async fn login(
    db: web::Data<Arc<MariaDbService>>,
    body: web::Json<RLogin>,
) -> ApiResult<LoginRes> {
    let user = db.authenticate_password(&body.username, &body.password).await?;
    if !user.is_staff {
        warn!("Non-staff user {} tried the admin login", user.username);
        return Err(AppError::Forbidden);
    }
    let user = db.record_login(user).await?;
    let token = db.issue_token(user.id).await?;
    info!("Admin login for {}", user.username);

    Ok(ApiResponse::Ok(LoginRes {
        token,
        user_id: user.id,
        role: user.role,
        redirect: "/admin/".to_string(),
    }))
}
