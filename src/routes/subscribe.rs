use std::sync::Arc;

use actix_web::{post, web};
use entity::user::Role;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    error::AppError,
    permission::Permission,
    response::{ApiResponse, ApiResult},
    subscription::{RToggle, SubscriptionTarget, ToggleRes},
};
use crate::utils::webutils::AuthUser;

fn toggle_permission(auth: &AuthUser, target: SubscriptionTarget, subscribing: bool) -> Result<(), AppError> {
    let perm = match (target, subscribing) {
        (SubscriptionTarget::Journalist, true) => Permission::AddJournalistSubscription,
        (SubscriptionTarget::Journalist, false) => Permission::DeleteJournalistSubscription,
        (SubscriptionTarget::Publisher, true) => Permission::AddPublisherSubscription,
        (SubscriptionTarget::Publisher, false) => Permission::DeletePublisherSubscription,
    };
    auth.require(perm).map(|_| ())
}

#[post("/journalist/{pk:\\d+}/")]
pub async fn journalist(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<ToggleRes> {
    let reader = auth.require_role(Role::Reader)?;
    let writer = db.get_journalist(path.into_inner()).await?;

    let currently = db.is_subscribed_to_journalist(reader.id, writer.id).await?;
    toggle_permission(&auth, SubscriptionTarget::Journalist, !currently)?;

    let subscribed = db.toggle_journalist_subscription(reader.id, writer.id).await?;
    let message = if subscribed {
        format!("You are now subscribed to {}!", writer.username)
    } else {
        format!("You have unsubscribed from {}.", writer.username)
    };
    Ok(ApiResponse::Ok(ToggleRes { subscribed, message }))
}

#[post("/publisher/{pk:\\d+}/")]
pub async fn publisher(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<ToggleRes> {
    let reader = auth.require_role(Role::Reader)?;
    let outlet = db.get_publisher(path.into_inner()).await?;

    let currently = db.is_subscribed_to_publisher(reader.id, outlet.id).await?;
    toggle_permission(&auth, SubscriptionTarget::Publisher, !currently)?;

    let subscribed = db.toggle_publisher_subscription(reader.id, outlet.id).await?;
    let message = if subscribed {
        format!("You are now subscribed to {}!", outlet.name)
    } else {
        format!("You have unsubscribed from {}.", outlet.name)
    };
    Ok(ApiResponse::Ok(ToggleRes { subscribed, message }))
}

/// Generic toggle used by the article list. Open to any signed-in user.
#[post("/toggle/")]
pub async fn toggle(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    body: web::Json<RToggle>,
) -> ApiResult<ToggleRes> {
    let (target, item_id) = body
        .target()
        .ok_or_else(|| AppError::Validation("Invalid subscription request.".to_string()))?;

    let (subscribed, name) = match target {
        SubscriptionTarget::Journalist => {
            let writer = db.get_user_by_id(item_id).await?;
            if writer.role != Role::Journalist {
                return Err(AppError::Validation(
                    "Cannot subscribe to this user role.".to_string(),
                ));
            }
            let subscribed = db.toggle_journalist_subscription(auth.id(), writer.id).await?;
            (subscribed, writer.username)
        }
        SubscriptionTarget::Publisher => {
            let outlet = db.get_publisher(item_id).await?;
            let subscribed = db.toggle_publisher_subscription(auth.id(), outlet.id).await?;
            (subscribed, outlet.name)
        }
    };

    let message = if subscribed {
        format!("Successfully subscribed to {name}!")
    } else {
        format!("Unsubscribed from {name}.")
    };
    Ok(ApiResponse::Ok(ToggleRes { subscribed, message }))
}
