use std::sync::Arc;

use actix_web::{get, post, put, web};
use tracing::info;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    error::AppError,
    publisher::{AdminPublisher, RPublisherWrite},
    response::{ApiResponse, ApiResult},
};
use crate::utils::{validation::validate_publisher, webutils::AuthUser};

fn cleaned(body: RPublisherWrite) -> Result<RPublisherWrite, AppError> {
    let body = RPublisherWrite {
        name: body.name.trim().to_string(),
        description: body.description.filter(|d| !d.trim().is_empty()),
        access_password: body.access_password,
    };
    let errors = validate_publisher(&body.name, &body.access_password);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }
    Ok(body)
}

#[get("/publishers/")]
pub async fn list(db: web::Data<Arc<MariaDbService>>) -> ApiResult<Vec<AdminPublisher>> {
    Ok(ApiResponse::Ok(
        db.list_publishers()
            .await?
            .into_iter()
            .map(AdminPublisher::from)
            .collect(),
    ))
}

#[post("/publishers/")]
pub async fn create(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    body: web::Json<RPublisherWrite>,
) -> ApiResult<AdminPublisher> {
    let publisher = db.create_publisher(cleaned(body.into_inner())?).await?;
    info!("{} created publisher {}", auth.user().username, publisher.name);
    Ok(ApiResponse::Created(publisher.into()))
}

#[put("/publishers/{id}/")]
pub async fn update(
    db: web::Data<Arc<MariaDbService>>,
    path: web::Path<i32>,
    body: web::Json<RPublisherWrite>,
) -> ApiResult<AdminPublisher> {
    let publisher = db
        .update_publisher(path.into_inner(), cleaned(body.into_inner())?)
        .await?;
    Ok(ApiResponse::Ok(publisher.into()))
}

#[actix_web::delete("/publishers/{id}/")]
pub async fn delete(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<()> {
    let id = path.into_inner();
    db.delete_publisher(id).await?;
    info!("{} deleted publisher {id}", auth.user().username);
    Ok(ApiResponse::NoContent)
}
