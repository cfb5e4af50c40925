use entity::publisher::Model as PublisherModel;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublisherRef {
    pub id: i32,
    pub name: String,
}

impl From<&PublisherModel> for PublisherRef {
    fn from(p: &PublisherModel) -> Self {
        Self { id: p.id, name: p.name.clone() }
    }
}

#[derive(Serialize, Debug)]
pub struct PublisherSummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub article_count: u64,
}

#[derive(Serialize, Debug)]
pub struct PublisherProfile {
    pub publisher: PublisherSummary,
    pub journalist_count: u64,
    pub subscriber_count: u64,
    pub is_subscribed: bool,
    pub published_articles: Vec<crate::types::article::ArticleView>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPublisherWrite {
    pub name: String,
    pub description: Option<String>,
    pub access_password: String,
}

/// Admin view, the only place the join password is shown.
#[derive(Serialize, Debug)]
pub struct AdminPublisher {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub access_password: String,
}

impl From<PublisherModel> for AdminPublisher {
    fn from(p: PublisherModel) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            access_password: p.access_password,
        }
    }
}
