//! Loader for JSON fixtures: a list of
//! `{"model": "<app>.<model>", "pk": <int>, "fields": {..}}` objects.
//!
//! Rows are written in dependency order inside one transaction. A row whose
//! pk already exists is updated in place, anything else is inserted.

use chrono::{DateTime, NaiveDateTime, Utc};
use entity::{
    article::{self, ArticleStatus},
    journalist_subscription, publisher, publisher_subscription,
    user::{self, Role},
};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::db::mariadb_service::MariaDbService;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown model '{model}' (pk {pk})")]
    UnknownModel { model: String, pk: i32 },
    #[error("invalid fields for {model} pk {pk}: {source}")]
    Fields {
        model: String,
        pk: i32,
        source: serde_json::Error,
    },
    #[error("could not load {model} pk {pk}: {source}")]
    Db {
        model: &'static str,
        pk: i32,
        source: DbErr,
    },
    #[error(transparent)]
    Transaction(#[from] DbErr),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    model: String,
    pk: i32,
    #[serde(default)]
    fields: Value,
}

/// Accepts RFC 3339 (`...Z` / offset) and naive timestamps, which are taken as UTC.
fn lenient_datetime<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(d)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|n| Some(n.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// File fields dump as `""` when empty.
fn blank_as_none<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.filter(|s| !s.trim().is_empty()))
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PublisherFields {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub access_password: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserFields {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub publishers: Vec<i32>,
}

impl UserFields {
    /// Role names are matched case-insensitively; a missing role means reader.
    pub fn role(&self) -> Result<Role, String> {
        match self.role.as_deref().map(str::to_ascii_uppercase).as_deref() {
            None | Some("") | Some("READER") => Ok(Role::Reader),
            Some("JOURNALIST") => Ok(Role::Journalist),
            Some("EDITOR") => Ok(Role::Editor),
            Some(other) => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ArticleFields {
    pub title: String,
    pub body: String,
    pub author: i32,
    #[serde(default)]
    pub publisher: Option<i32>,
    #[serde(default)]
    pub editor: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub publication_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub featured_image: Option<String>,
}

impl ArticleFields {
    pub fn status(&self) -> Result<ArticleStatus, String> {
        match self.status.as_deref().map(str::to_ascii_uppercase).as_deref() {
            None | Some("") | Some("DRAFT") => Ok(ArticleStatus::Draft),
            Some("AWAITING_REVIEW") => Ok(ArticleStatus::AwaitingReview),
            Some("REJECTED") => Ok(ArticleStatus::Rejected),
            Some("PUBLISHED") => Ok(ArticleStatus::Published),
            Some(other) => Err(format!("unknown status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PublisherSubscriptionFields {
    pub reader: i32,
    pub publisher: i32,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date_subscribed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct JournalistSubscriptionFields {
    pub reader: i32,
    pub journalist: i32,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date_subscribed: Option<DateTime<Utc>>,
}

/// A parsed fixture, already grouped in load order.
#[derive(Debug, Default)]
pub struct Fixture {
    pub publishers: Vec<(i32, PublisherFields)>,
    pub users: Vec<(i32, UserFields)>,
    pub articles: Vec<(i32, ArticleFields)>,
    pub publisher_subscriptions: Vec<(i32, PublisherSubscriptionFields)>,
    pub journalist_subscriptions: Vec<(i32, JournalistSubscriptionFields)>,
}

impl Fixture {
    pub fn len(&self) -> usize {
        self.publishers.len()
            + self.users.len()
            + self.articles.len()
            + self.publisher_subscriptions.len()
            + self.journalist_subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn fields<T: for<'de> Deserialize<'de>>(record: &RawRecord) -> Result<T, FixtureError> {
    serde_json::from_value(record.fields.clone()).map_err(|source| FixtureError::Fields {
        model: record.model.clone(),
        pk: record.pk,
        source,
    })
}

pub fn parse_fixture(json: &str) -> Result<Fixture, FixtureError> {
    let records: Vec<RawRecord> = serde_json::from_str(json)?;
    let mut fixture = Fixture::default();

    for record in &records {
        // App label is irrelevant: "DailyNews_App.customuser" -> "customuser".
        let name = record
            .model
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match name.as_str() {
            "publisher" => fixture.publishers.push((record.pk, fields(record)?)),
            "customuser" | "user" => fixture.users.push((record.pk, fields(record)?)),
            "article" => fixture.articles.push((record.pk, fields(record)?)),
            "publishersubscription" => fixture
                .publisher_subscriptions
                .push((record.pk, fields(record)?)),
            "journalistsubscription" => fixture
                .journalist_subscriptions
                .push((record.pk, fields(record)?)),
            _ => {
                return Err(FixtureError::UnknownModel {
                    model: record.model.clone(),
                    pk: record.pk,
                })
            }
        }
    }
    Ok(fixture)
}

/// Inserts the active model, or updates it when a row with this pk exists.
async fn upsert<A, E>(txn: &DatabaseTransaction, pk: i32, am: A) -> Result<(), DbErr>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    if E::find_by_id(pk).one(txn).await?.is_some() {
        am.update(txn).await?;
    } else {
        am.insert(txn).await?;
    }
    Ok(())
}

fn db_err(model: &'static str, pk: i32) -> impl FnOnce(DbErr) -> FixtureError {
    move |source| FixtureError::Db { model, pk, source }
}

fn value_err(model: &'static str, pk: i32) -> impl FnOnce(String) -> FixtureError {
    move |msg| FixtureError::Db { model, pk, source: DbErr::Custom(msg) }
}

impl MariaDbService {
    /// Loads a whole fixture. Either every row lands or none does.
    pub async fn load_fixture(&self, fixture: Fixture) -> Result<usize, FixtureError> {
        let total = fixture.len();
        let txn = self.database_connection.begin().await?;
        match write_fixture(&txn, fixture).await {
            Ok(()) => {
                txn.commit().await?;
                info!("Installed {total} object(s) from fixture");
                Ok(total)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e)
            }
        }
    }
}

async fn write_fixture(txn: &DatabaseTransaction, fixture: Fixture) -> Result<(), FixtureError> {
    let now = Utc::now();

    for (pk, f) in fixture.publishers {
        let am = publisher::ActiveModel {
            id: Set(pk),
            name: Set(f.name),
            description: Set(f.description),
            access_password: Set(f.access_password),
        };
        upsert(txn, pk, am).await.map_err(db_err("publisher", pk))?;
    }

    for (pk, f) in fixture.users {
        let role = f.role().map_err(value_err("user", pk))?;
        let am = user::ActiveModel {
            id: Set(pk),
            username: Set(f.username),
            email: Set(f.email),
            first_name: Set(f.first_name),
            last_name: Set(f.last_name),
            password: Set(f.password),
            role: Set(role),
            profile_photo: Set(f.profile_photo),
            is_staff: Set(f.is_staff),
            is_superuser: Set(f.is_superuser),
            is_active: Set(f.is_active),
            token_hash: Set(None),
            date_joined: Set(f.date_joined.unwrap_or(now)),
            last_login: Set(f.last_login),
        };
        upsert(txn, pk, am).await.map_err(db_err("user", pk))?;
        MariaDbService::set_user_publishers(txn, pk, &f.publishers)
            .await
            .map_err(db_err("user", pk))?;
    }

    for (pk, f) in fixture.articles {
        let status = f.status().map_err(value_err("article", pk))?;
        let mut am = article::ActiveModel {
            id: Set(pk),
            title: Set(f.title),
            body: Set(f.body),
            author_id: Set(f.author),
            publisher_id: Set(f.publisher),
            editor_id: Set(f.editor),
            status: Set(status),
            publication_date: Set(f.publication_date),
            featured_image: Set(f.featured_image),
            ..Default::default()
        };
        if let Some(created) = f.creation_date {
            am.creation_date = Set(created);
        }
        upsert(txn, pk, am).await.map_err(db_err("article", pk))?;
    }

    for (pk, f) in fixture.publisher_subscriptions {
        let am = publisher_subscription::ActiveModel {
            id: Set(pk),
            reader_id: Set(f.reader),
            publisher_id: Set(f.publisher),
            date_subscribed: Set(f.date_subscribed.unwrap_or(now)),
        };
        upsert(txn, pk, am)
            .await
            .map_err(db_err("publishersubscription", pk))?;
    }

    for (pk, f) in fixture.journalist_subscriptions {
        let am = journalist_subscription::ActiveModel {
            id: Set(pk),
            reader_id: Set(f.reader),
            journalist_id: Set(f.journalist),
            date_subscribed: Set(f.date_subscribed.unwrap_or(now)),
        };
        upsert(txn, pk, am)
            .await
            .map_err(db_err("journalistsubscription", pk))?;
    }

    Ok(())
}
