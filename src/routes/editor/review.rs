use std::sync::Arc;

use actix_web::{get, post, web};
use entity::article::{ArticleStatus, Model as ArticleModel};
use entity::user::{Model as UserModel, Role};
use tracing::info;

use crate::db::mariadb_service::MariaDbService;
use crate::types::{
    article::{ArticleView, RArticleReview, ReviewRes},
    error::AppError,
    permission::Permission,
    response::{ApiResponse, ApiResult},
};
use crate::utils::{
    mail::Notifier, validation::validate_article, webutils::AuthUser, workflow::ReviewAction,
};

/// Loads an article the editor may review: its publisher must be one of theirs.
async fn reviewable(db: &MariaDbService, editor: &UserModel, pk: i32) -> Result<ArticleModel, AppError> {
    let article = db.get_article(pk).await?;
    let publishers = db.publisher_ids_for_user(editor.id).await?;
    if !article.publisher_id.is_some_and(|p| publishers.contains(&p)) {
        return Err(AppError::Denied(
            "You do not have permission to review this article.".to_string(),
        ));
    }
    Ok(article)
}

#[get("/article/review/{pk:\\d+}/")]
pub async fn review(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<ArticleView> {
    let editor = auth.require_role(Role::Editor)?;
    let article = reviewable(&db, editor, path.into_inner()).await?;
    Ok(ApiResponse::Ok(db.article_view(article).await?))
}

#[post("/article/review/{pk:\\d+}/")]
pub async fn review_action(
    db: web::Data<Arc<MariaDbService>>,
    notifier: web::Data<Notifier>,
    auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<RArticleReview>,
) -> ApiResult<ReviewRes> {
    let editor = auth.require_role(Role::Editor)?;
    let article = reviewable(&db, editor, path.into_inner()).await?;
    let body = body.into_inner();

    if body.action == ReviewAction::Delete {
        auth.require(Permission::DeleteArticle)?;
        db.delete_article(article.id).await?;
        info!("Editor {} deleted article {}", editor.id, article.id);
        return Ok(ApiResponse::Ok(ReviewRes {
            message: format!("Article '{}' was deleted.", article.title),
            article: None,
        }));
    }

    auth.require(Permission::ChangeArticle)?;
    let title = body.title.as_deref().unwrap_or(&article.title);
    let text = body.body.as_deref().unwrap_or(&article.body);
    let errors = validate_article(title, text);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let status = match body.action {
        ReviewAction::Publish => {
            auth.require(Permission::PublishArticle)?;
            Some(ArticleStatus::Published)
        }
        ReviewAction::Reject => Some(ArticleStatus::Rejected),
        ReviewAction::Save | ReviewAction::Delete => None,
    };
    let was_published = article.status == ArticleStatus::Published;

    let saved = db
        .review_article(
            article,
            editor.id,
            body.title.map(|t| t.trim().to_string()),
            body.body,
            body.featured_image,
            status,
        )
        .await?;
    let view = db.article_view(saved).await?;

    let message = match body.action {
        ReviewAction::Publish => {
            if !was_published {
                notifier.spawn_publication(db.get_ref().clone(), view.clone());
            }
            format!("Article '{}' published successfully!", view.title)
        }
        ReviewAction::Reject => format!("Article '{}' was rejected.", view.title),
        _ => format!("Article '{}' content edits saved.", view.title),
    };
    info!("Editor {} reviewed article {} ({})", editor.id, view.id, view.status.as_str());

    Ok(ApiResponse::Ok(ReviewRes {
        message,
        article: Some(view),
    }))
}
