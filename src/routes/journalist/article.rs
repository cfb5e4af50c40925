use std::sync::Arc;

use actix_web::{get, post, web};
use entity::article::{ArticleStatus, Model as ArticleModel};
use entity::user::{Model as UserModel, Role};
use tracing::info;

use crate::db::{article::ArticleContent, mariadb_service::MariaDbService};
use crate::types::{
    article::{ArticleSaveRes, ArticleView, RArticleWrite},
    error::AppError,
    permission::Permission,
    response::{ApiResponse, ApiResult, Message},
};
use crate::utils::{
    mail::Notifier,
    validation::validate_article,
    webutils::AuthUser,
    workflow::{ensure_deletable, ensure_editable, plan_journalist_save},
};

#[post("/article/create/")]
pub async fn create(
    db: web::Data<Arc<MariaDbService>>,
    notifier: web::Data<Notifier>,
    auth: AuthUser,
    body: web::Json<RArticleWrite>,
) -> ApiResult<ArticleSaveRes> {
    let journalist = auth.require_role(Role::Journalist)?;
    auth.require(Permission::AddArticle)?;
    let res = save_article(&db, &notifier, journalist, None, body.into_inner()).await?;
    Ok(ApiResponse::Created(res))
}

#[post("/article/edit/{pk:\\d+}/")]
pub async fn edit(
    db: web::Data<Arc<MariaDbService>>,
    notifier: web::Data<Notifier>,
    auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<RArticleWrite>,
) -> ApiResult<ArticleSaveRes> {
    let journalist = auth.require_role(Role::Journalist)?;
    auth.require(Permission::ChangeArticle)?;

    let article = db.get_article(path.into_inner()).await?;
    if article.author_id != journalist.id {
        return Err(AppError::Denied(
            "You do not have permission to edit this article.".to_string(),
        ));
    }
    ensure_editable(&article).map_err(AppError::Denied)?;

    let res = save_article(&db, &notifier, journalist, Some(article), body.into_inner()).await?;
    Ok(ApiResponse::Ok(res))
}

/// Create and edit share one save path. A bad submission target still saves
/// the article as a draft and reports the problem in `error`.
async fn save_article(
    db: &web::Data<Arc<MariaDbService>>,
    notifier: &Notifier,
    author: &UserModel,
    existing: Option<ArticleModel>,
    body: RArticleWrite,
) -> Result<ArticleSaveRes, AppError> {
    let errors = validate_article(&body.title, &body.body);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let affiliated = db.publisher_ids_for_user(author.id).await?;
    let current_publisher = existing.as_ref().and_then(|a| a.publisher_id);
    let plan = plan_journalist_save(body.action, body.publisher_to_submit, &affiliated, current_publisher);

    let content = ArticleContent {
        title: body.title.trim().to_string(),
        body: body.body,
        featured_image: body.featured_image.filter(|i| !i.is_empty()),
    };
    let saved = match existing {
        Some(article) => {
            db.update_article(article, content, plan.status, plan.publisher_id)
                .await?
        }
        None => {
            db.insert_article(author.id, content, plan.status, plan.publisher_id)
                .await?
        }
    };
    let article = db.article_view(saved).await?;

    // Only drafts reach this point, so a published result is always a fresh publication.
    if article.status == ArticleStatus::Published {
        notifier.spawn_publication(db.get_ref().clone(), article.clone());
    }

    let message = save_message(&article);
    info!("Journalist {} saved article {} as {}", author.id, article.id, article.status.as_str());
    Ok(ArticleSaveRes {
        article,
        message,
        error: plan.error,
    })
}

pub fn save_message(article: &ArticleView) -> String {
    match article.status {
        ArticleStatus::Published => format!("Article '{}' published successfully!", article.title),
        ArticleStatus::AwaitingReview => format!(
            "Article '{}' submitted to {} for review.",
            article.title,
            article
                .publisher
                .as_ref()
                .map(|p| p.name.as_str())
                .unwrap_or("a publisher")
        ),
        _ => format!("Article '{}' saved as a draft.", article.title),
    }
}

async fn own_article(db: &MariaDbService, author_id: i32, pk: i32) -> Result<ArticleModel, AppError> {
    let article = db.get_article(pk).await?;
    if article.author_id != author_id {
        return Err(AppError::NotFound);
    }
    Ok(article)
}

#[get("/article/view/journalist/{pk:\\d+}/")]
pub async fn view(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<ArticleView> {
    let journalist = auth.require_role(Role::Journalist)?;
    let article = own_article(&db, journalist.id, path.into_inner()).await?;
    Ok(ApiResponse::Ok(db.article_view(article).await?))
}

#[actix_web::delete("/article/view/journalist/{pk:\\d+}/")]
pub async fn view_delete(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<Message> {
    let journalist = auth.require_role(Role::Journalist)?;
    let article = own_article(&db, journalist.id, path.into_inner()).await?;
    db.delete_article(article.id).await?;
    Ok(ApiResponse::Ok(Message::new(format!(
        "Article '{}' deleted successfully.",
        article.title
    ))))
}

/// Authors, and editors of the article's publisher, may delete articles that
/// are not finalized.
#[post("/article/delete/{pk:\\d+}/")]
pub async fn delete(
    db: web::Data<Arc<MariaDbService>>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<Message> {
    let user = auth.require_staff_role()?;
    auth.require(Permission::DeleteArticle)?;
    let article = db.get_article(path.into_inner()).await?;

    let is_author = article.author_id == user.id;
    let is_affiliated_editor = user.role == Role::Editor
        && match article.publisher_id {
            Some(p) => db.publisher_ids_for_user(user.id).await?.contains(&p),
            None => false,
        };
    if !(is_author || is_affiliated_editor) {
        return Err(AppError::Denied(
            "You do not have permission to delete this article.".to_string(),
        ));
    }
    ensure_deletable(&article).map_err(AppError::Denied)?;

    db.delete_article(article.id).await?;
    info!("User {} deleted article {}", user.id, article.id);
    Ok(ApiResponse::Ok(Message::new(format!(
        "Article '{}' was successfully deleted.",
        article.title
    ))))
}
