use std::sync::Arc;

use actix_web::{post, web};
use tracing::info;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    response::{ApiResponse, ApiResult, Message},
    user::{LoginRes, RLogin},
};
use crate::utils::{
    webutils::{decode_all, AuthUser},
    workflow::role_home,
};

/// Only same-site paths are followed; anything else falls back to the role home.
/// Browsers read `/\host` like `//host` and drop tabs or newlines, so those
/// are refused too.
pub fn safe_next(next: Option<&str>) -> Option<String> {
    let next = decode_all(next?.trim())?;
    let mut chars = next.chars();
    if chars.next() != Some('/') || matches!(chars.next(), Some('/' | '\\')) {
        return None;
    }
    if next.chars().any(char::is_control) {
        return None;
    }
    Some(next)
}

#[post("/login/")]
pub async fn login(
    db: web::Data<Arc<MariaDbService>>,
    body: web::Json<RLogin>,
) -> ApiResult<LoginRes> {
    let body = body.into_inner();
    let user = db.authenticate_password(&body.username, &body.password).await?;
    let user = db.record_login(user).await?;
    let token = db.issue_token(user.id).await?;
    info!("User {} logged in", user.username);

    let redirect = safe_next(body.next.as_deref()).unwrap_or_else(|| role_home(user.role).to_string());
    Ok(ApiResponse::Ok(LoginRes {
        token,
        user_id: user.id,
        role: user.role,
        redirect,
    }))
}

#[post("/logout/")]
pub async fn logout(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
) -> ApiResult<Message> {
    db.clear_token(auth.id()).await?;
    Ok(ApiResponse::Ok(Message::new("You have been logged out.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(safe_next(Some("/article/3/")).as_deref(), Some("/article/3/"));
        assert_eq!(safe_next(Some("%2Fprofile%2F")).as_deref(), Some("/profile/"));
        assert_eq!(safe_next(Some("https://evil.test/")), None);
        assert_eq!(safe_next(Some("//evil.test/")), None);
        assert_eq!(safe_next(Some("/\\evil.test/")), None);
        assert_eq!(safe_next(Some("%2F%5Cevil.test")), None);
        assert_eq!(safe_next(Some("%2F%2Fevil.test")), None);
        assert_eq!(safe_next(Some("/%09/evil.test")), None);
        assert_eq!(safe_next(Some("javascript:alert(1)")), None);
        assert_eq!(safe_next(Some("")), None);
        assert_eq!(safe_next(None), None);
    }
}
