use chrono::{DateTime, Utc};
use entity::article::{ArticleStatus, Model as ArticleModel};
use entity::user::Model as UserModel;
use serde::{Deserialize, Serialize};

use crate::types::publisher::{PublisherRef, PublisherSummary};
use crate::types::user::JournalistSummary;
use crate::utils::workflow::{ArticleAction, ReviewAction};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: i32,
    pub username: String,
    pub display_name: String,
}

impl From<&UserModel> for AuthorRef {
    fn from(u: &UserModel) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            display_name: u.display_name(),
        }
    }
}

/// Article with its author and publisher resolved.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ArticleView {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub status: ArticleStatus,
    pub is_approved: bool,
    pub creation_date: DateTime<Utc>,
    pub last_edited_date: DateTime<Utc>,
    pub publication_date: Option<DateTime<Utc>>,
    pub featured_image: Option<String>,
    pub author: AuthorRef,
    pub publisher: Option<PublisherRef>,
    pub editor_id: Option<i32>,
}

impl ArticleView {
    pub fn new(a: ArticleModel, author: AuthorRef, publisher: Option<PublisherRef>) -> Self {
        Self {
            id: a.id,
            title: a.title,
            body: a.body,
            status: a.status,
            is_approved: a.is_approved,
            creation_date: a.creation_date,
            last_edited_date: a.last_edited_date,
            publication_date: a.publication_date,
            featured_image: a.featured_image,
            author,
            publisher,
            editor_id: a.editor_id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RArticleWrite {
    pub title: String,
    pub body: String,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub action: ArticleAction,
    pub publisher_to_submit: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RArticleReview {
    #[serde(default)]
    pub action: ReviewAction,
    pub title: Option<String>,
    pub body: Option<String>,
    pub featured_image: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ArticleSaveRes {
    pub article: ArticleView,
    pub message: String,
    /// Present when a submission could not go through and was kept as a draft.
    pub error: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ArticleListEntry {
    pub article: ArticleView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subbed_j: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subbed_p: Option<bool>,
}

#[derive(Serialize, Debug)]
pub struct ReaderHome {
    pub subscribed_feed: Vec<ArticleView>,
    pub general_feed: Vec<ArticleView>,
    pub article_feed: Vec<ArticleView>,
    pub journalist_subs: Vec<JournalistSummary>,
    pub publisher_subs: Vec<PublisherSummary>,
}

#[derive(Serialize, Debug)]
pub struct ArticleReaderRes {
    pub article: ArticleView,
    pub is_subscribed: bool,
    pub more_articles: Vec<ArticleView>,
}

#[derive(Serialize, Debug)]
pub struct JournalistDashboard {
    pub journalist_articles: Vec<ArticleView>,
    pub drafts: Vec<ArticleView>,
    pub awaiting_review: Vec<ArticleView>,
    pub published: Vec<ArticleView>,
    pub rejected: Vec<ArticleView>,
    pub affiliated_publishers: Vec<PublisherRef>,
}

#[derive(Serialize, Debug)]
pub struct EditorDashboard {
    pub articles_to_review: Vec<ArticleView>,
    pub publishers: Vec<PublisherRef>,
}

/// Author block of the public API, no contact details.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiJournalist {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub publishers: Vec<PublisherRef>,
    pub profile_photo: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiArticle {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub publication_date: Option<DateTime<Utc>>,
    pub author: ApiJournalist,
    pub publisher: Option<PublisherRef>,
    pub article_url: String,
    pub featured_image: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RArticleFilter {
    pub status: Option<ArticleStatus>,
}

#[derive(Serialize, Debug)]
pub struct ReviewRes {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleView>,
}
