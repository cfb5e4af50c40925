use std::sync::Arc;

use actix_web::{post, web};

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    error::AppError,
    response::{ApiResponse, ApiResult, Message},
    user::{RPasswordReset, RPasswordResetConfirm},
};
use crate::utils::{mail::Notifier, token::encrypt, validation::validate_password};

const INVALID_LINK: &str = "The password reset link is invalid or has expired.";

/// Answers the same whether or not the address is known.
#[post("/password_reset/")]
pub async fn request_reset(
    db: web::Data<Arc<MariaDbService>>,
    notifier: web::Data<Notifier>,
    body: web::Json<RPasswordReset>,
) -> ApiResult<Message> {
    let email = body.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("Email Address is required.".to_string()));
    }
    for user in db.find_active_users_by_email(email).await? {
        let code = db.create_password_reset(user.id).await?;
        notifier.mail_password_reset(&user.email, user.id, &code).await;
    }
    Ok(ApiResponse::Ok(Message::new(
        "We've emailed you instructions for setting your password, if an account exists with the email you entered.",
    )))
}

#[post("/reset/{uid}/{code}/")]
pub async fn confirm_reset(
    db: web::Data<Arc<MariaDbService>>,
    path: web::Path<(i32, String)>,
    body: web::Json<RPasswordResetConfirm>,
) -> ApiResult<Message> {
    let (uid, code) = path.into_inner();
    let user = match db.get_user_by_id(uid).await {
        Ok(user) => user,
        Err(AppError::NotFound) => return Err(AppError::Missing(INVALID_LINK.to_string())),
        Err(e) => return Err(e),
    };

    let errors = validate_password(&user.username, &body.new_password1, &body.new_password2);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let hash = encrypt(&body.new_password1).map_err(|e| AppError::Internal(e.to_string()))?;
    db.confirm_password_reset(uid, &code, hash).await?;
    Ok(ApiResponse::Ok(Message::new(
        "Your password has been set. You may go ahead and log in now.",
    )))
}
