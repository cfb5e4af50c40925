use std::collections::HashSet;

use entity::article::{ArticleStatus, Model as ArticleModel};
use entity::user::Role;
use serde::{Deserialize, Serialize};

/// What a journalist asked for when saving an article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleAction {
    #[default]
    Draft,
    SubmitPublisher,
    PublishIndependent,
}

/// What an editor does from the review page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    #[default]
    Save,
    Publish,
    Reject,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub status: ArticleStatus,
    pub publisher_id: Option<i32>,
    /// Set when a submission fell back to a draft.
    pub error: Option<String>,
}

/// Resolves the status and publisher for a journalist save.
pub fn plan_journalist_save(
    action: ArticleAction,
    publisher_to_submit: Option<i32>,
    affiliated: &[i32],
    current_publisher: Option<i32>,
) -> SavePlan {
    match action {
        ArticleAction::PublishIndependent => SavePlan {
            status: ArticleStatus::Published,
            publisher_id: None,
            error: None,
        },
        ArticleAction::SubmitPublisher => match publisher_to_submit {
            Some(id) if affiliated.contains(&id) => SavePlan {
                status: ArticleStatus::AwaitingReview,
                publisher_id: Some(id),
                error: None,
            },
            Some(_) => SavePlan {
                status: ArticleStatus::Draft,
                publisher_id: None,
                error: Some("Invalid publisher selected.".to_string()),
            },
            None => SavePlan {
                status: ArticleStatus::Draft,
                publisher_id: None,
                error: Some("Please select a publisher for review.".to_string()),
            },
        },
        ArticleAction::Draft => SavePlan {
            status: ArticleStatus::Draft,
            publisher_id: current_publisher,
            error: None,
        },
    }
}

/// Journalists may only touch drafts, everything else is with an editor or final.
pub fn ensure_editable(article: &ArticleModel) -> Result<(), String> {
    match article.status {
        ArticleStatus::Draft => Ok(()),
        other => Err(format!(
            "Article '{}' cannot be edited because its status is '{}' and is considered finalized or pending editor action.",
            article.title,
            other.display()
        )),
    }
}

pub fn ensure_deletable(article: &ArticleModel) -> Result<(), String> {
    match article.status {
        ArticleStatus::Draft | ArticleStatus::AwaitingReview => Ok(()),
        other => Err(format!(
            "Article '{}' cannot be deleted because its status is '{}' and is considered finalized.",
            article.title,
            other.display()
        )),
    }
}

pub fn role_home(role: Role) -> &'static str {
    match role {
        Role::Journalist => "/journalist/dashboard/",
        Role::Editor => "/editor/dashboard/",
        Role::Reader => "/",
    }
}

pub fn matches_subscription(
    article: &ArticleModel,
    journalists: &HashSet<i32>,
    publishers: &HashSet<i32>,
) -> bool {
    journalists.contains(&article.author_id)
        || article.publisher_id.is_some_and(|p| publishers.contains(&p))
}

/// Splits published articles into (subscribed, general), keeping order.
pub fn split_feed(
    articles: Vec<ArticleModel>,
    journalists: &HashSet<i32>,
    publishers: &HashSet<i32>,
) -> (Vec<ArticleModel>, Vec<ArticleModel>) {
    articles
        .into_iter()
        .partition(|a| matches_subscription(a, journalists, publishers))
}
