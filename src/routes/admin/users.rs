use std::sync::Arc;

use actix_web::{get, put, web};
use entity::user::Model as UserModel;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    publisher::PublisherRef,
    response::{ApiResponse, ApiResult},
    user::{AdminUser, RAdminUserUpdate},
};

fn admin_user(user: UserModel, publishers: Vec<PublisherRef>) -> AdminUser {
    AdminUser {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
        is_staff: user.is_staff,
        is_superuser: user.is_superuser,
        is_active: user.is_active,
        publishers,
    }
}

#[get("/users/")]
pub async fn list(db: web::Data<Arc<MariaDbService>>) -> ApiResult<Vec<AdminUser>> {
    let users = db.list_users().await?;
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
    let mut affiliations = db.publishers_for_users(&ids).await?;
    Ok(ApiResponse::Ok(
        users
            .into_iter()
            .map(|u| {
                let publishers = affiliations.remove(&u.id).unwrap_or_default();
                admin_user(u, publishers)
            })
            .collect(),
    ))
}

#[put("/users/{id}/")]
pub async fn update(
    db: web::Data<Arc<MariaDbService>>,
    path: web::Path<i32>,
    body: web::Json<RAdminUserUpdate>,
) -> ApiResult<AdminUser> {
    let user = db.admin_update_user(path.into_inner(), body.into_inner()).await?;
    let publishers = db
        .publishers_for_user(user.id)
        .await?
        .iter()
        .map(PublisherRef::from)
        .collect();
    Ok(ApiResponse::Ok(admin_user(user, publishers)))
}
