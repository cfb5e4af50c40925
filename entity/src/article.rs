use async_trait::async_trait;
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "AWAITING_REVIEW")]
    AwaitingReview,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "DRAFT",
            ArticleStatus::AwaitingReview => "AWAITING_REVIEW",
            ArticleStatus::Rejected => "REJECTED",
            ArticleStatus::Published => "PUBLISHED",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "Draft",
            ArticleStatus::AwaitingReview => "Awaiting Editor Review",
            ArticleStatus::Rejected => "Rejected",
            ArticleStatus::Published => "Published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub creation_date: DateTimeUtc,
    pub last_edited_date: DateTimeUtc,
    pub publication_date: Option<DateTimeUtc>,
    pub publisher_id: Option<i32>,
    pub author_id: i32,
    pub editor_id: Option<i32>,
    pub status: ArticleStatus,
    pub is_approved: bool,
    pub featured_image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::publisher::Entity",
        from = "Column::PublisherId",
        to   = "super::publisher::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Publisher,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to   = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::EditorId",
        to   = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Editor,
}

impl Related<super::publisher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Publisher.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

fn current<V: Clone + Into<sea_orm::Value>>(value: &ActiveValue<V>) -> Option<V> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v.clone()),
        ActiveValue::NotSet => None,
    }
}

/// Keeps `is_approved` in lock-step with the status and stamps dates.
/// Published articles always carry a publication date.
pub fn apply_save_rules(mut am: ActiveModel, insert: bool, now: DateTimeUtc) -> ActiveModel {
    let published = current(&am.status) == Some(ArticleStatus::Published);

    if current(&am.is_approved) != Some(published) {
        am.is_approved = ActiveValue::Set(published);
    }
    if published && current(&am.publication_date).flatten().is_none() {
        am.publication_date = ActiveValue::Set(Some(now));
    }
    if insert && current(&am.creation_date).is_none() {
        am.creation_date = ActiveValue::Set(now);
    }
    am.last_edited_date = ActiveValue::Set(now);
    am
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(apply_save_rules(self, insert, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> ActiveModel {
        ActiveModel {
            title: ActiveValue::Set("t".into()),
            body: ActiveValue::Set("b".into()),
            author_id: ActiveValue::Set(1),
            status: ActiveValue::Set(ArticleStatus::Draft),
            ..Default::default()
        }
    }

    #[test]
    fn draft_is_never_approved() {
        let now = Utc::now();
        let mut am = draft();
        am.is_approved = ActiveValue::Set(true);
        let am = apply_save_rules(am, true, now);
        assert_eq!(am.is_approved, ActiveValue::Set(false));
        assert_eq!(am.publication_date, ActiveValue::NotSet);
        assert_eq!(am.creation_date, ActiveValue::Set(now));
    }

    #[test]
    fn publishing_sets_approval_and_date() {
        let now = Utc::now();
        let mut am = draft();
        am.status = ActiveValue::Set(ArticleStatus::Published);
        let am = apply_save_rules(am, false, now);
        assert_eq!(am.is_approved, ActiveValue::Set(true));
        assert_eq!(am.publication_date, ActiveValue::Set(Some(now)));
        assert_eq!(am.creation_date, ActiveValue::NotSet);
    }

    #[test]
    fn existing_publication_date_is_kept() {
        let earlier = Utc.with_ymd_and_hms(2025, 11, 15, 0, 0, 0).unwrap();
        let mut am = draft();
        am.status = ActiveValue::Set(ArticleStatus::Published);
        am.publication_date = ActiveValue::Unchanged(Some(earlier));
        let am = apply_save_rules(am, false, Utc::now());
        assert_eq!(am.publication_date, ActiveValue::Unchanged(Some(earlier)));
    }

    #[test]
    fn rejection_revokes_approval() {
        let mut am = draft();
        am.status = ActiveValue::Set(ArticleStatus::Rejected);
        am.is_approved = ActiveValue::Unchanged(true);
        let am = apply_save_rules(am, false, Utc::now());
        assert_eq!(am.is_approved, ActiveValue::Set(false));
    }
}
