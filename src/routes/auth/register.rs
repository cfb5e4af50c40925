use std::sync::Arc;

use actix_web::{get, post, web};
use entity::user::Role;
use tracing::info;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    error::AppError,
    publisher::PublisherRef,
    response::{ApiResponse, ApiResult},
    user::{DBUserCreate, RRegister, RegisterOptions, RegisterRes},
};
use crate::utils::{
    token::encrypt,
    validation::{check_publisher_passwords, validate_email, validate_password, validate_username},
    workflow::role_home,
};

#[get("/register/")]
pub async fn options(db: web::Data<Arc<MariaDbService>>) -> ApiResult<RegisterOptions> {
    let publishers = db
        .list_publishers()
        .await?
        .iter()
        .map(PublisherRef::from)
        .collect();
    Ok(ApiResponse::Ok(RegisterOptions {
        roles: vec![Role::Reader, Role::Journalist, Role::Editor],
        publishers,
    }))
}

#[post("/register/reader/")]
pub async fn register_reader(
    db: web::Data<Arc<MariaDbService>>,
    body: web::Json<RRegister>,
) -> ApiResult<RegisterRes> {
    register_user(&db, Role::Reader, body.into_inner()).await
}

#[post("/register/journalist/")]
pub async fn register_journalist(
    db: web::Data<Arc<MariaDbService>>,
    body: web::Json<RRegister>,
) -> ApiResult<RegisterRes> {
    register_user(&db, Role::Journalist, body.into_inner()).await
}

#[post("/register/editor/")]
pub async fn register_editor(
    db: web::Data<Arc<MariaDbService>>,
    body: web::Json<RRegister>,
) -> ApiResult<RegisterRes> {
    register_user(&db, Role::Editor, body.into_inner()).await
}

/// Shared by the three registration endpoints. Field errors are collected
/// and reported together.
async fn register_user(
    db: &MariaDbService,
    role: Role,
    body: RRegister,
) -> ApiResult<RegisterRes> {
    let username = body.username.trim().to_string();
    let email = body.email.trim().to_string();

    let mut errors = Vec::new();
    match validate_username(&username) {
        Some(e) => errors.push(e),
        None => {
            if db.user_exists_by_username(&username).await? {
                errors.push("A user with that username already exists.".to_string());
            }
        }
    }
    errors.extend(validate_email(&email));
    errors.extend(validate_password(&username, &body.password1, &body.password2));

    let publishers = if role.is_staff_role() {
        let known = db.publishers_by_name().await?;
        match check_publisher_passwords(role, &body.publisher_passwords, &known) {
            Ok(publishers) => publishers,
            Err(e) => {
                errors.extend(e);
                vec![]
            }
        }
    } else {
        vec![]
    };

    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let password = encrypt(&body.password1).map_err(|e| AppError::Internal(e.to_string()))?;
    let publisher_ids: Vec<i32> = publishers.iter().map(|p| p.id).collect();
    let user = db
        .create_user(
            DBUserCreate {
                username,
                email,
                first_name: body.first_name.trim().to_string(),
                last_name: body.last_name.trim().to_string(),
                password,
                role,
                profile_photo: body.profile_photo.filter(|p| !p.is_empty()),
                is_staff: false,
                is_superuser: false,
            },
            &publisher_ids,
        )
        .await?;
    let token = db.issue_token(user.id).await?;
    info!("Registered {} as {}", user.username, role.as_str());

    Ok(ApiResponse::Created(RegisterRes {
        user_id: user.id,
        token,
        role,
        redirect: role_home(role).to_string(),
        message: format!("Welcome to Daily News! You are registered as a {}.", role.label()),
    }))
}
