use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "READER")]
    Reader,
    #[sea_orm(string_value = "JOURNALIST")]
    Journalist,
    #[sea_orm(string_value = "EDITOR")]
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "READER",
            Role::Journalist => "JOURNALIST",
            Role::Editor => "EDITOR",
        }
    }

    /// Human label, also the name of the permission group.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Reader => "Reader",
            Role::Journalist => "Journalist",
            Role::Editor => "Editor",
        }
    }

    pub fn is_staff_role(&self) -> bool {
        matches!(self, Role::Journalist | Role::Editor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub profile_photo: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub token_hash: Option<String>,
    pub date_joined: DateTimeUtc,
    pub last_login: Option<DateTimeUtc>,
}

impl Model {
    /// `first last`, or the username when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_publisher::Entity")]
    UserPublisher,
}

impl Related<super::publisher::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_publisher::Relation::Publisher.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_publisher::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(first: &str, last: &str) -> Model {
        Model {
            id: 1,
            username: "j1".into(),
            email: "j1@news.com".into(),
            first_name: first.into(),
            last_name: last.into(),
            password: String::new(),
            role: Role::Journalist,
            profile_photo: None,
            is_staff: false,
            is_superuser: false,
            is_active: true,
            token_hash: None,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn display_name_falls_back_to_username() {
        assert_eq!(user("", "").display_name(), "j1");
        assert_eq!(user("Ann", "").display_name(), "Ann");
        assert_eq!(user("Ann", "Lee").display_name(), "Ann Lee");
    }

    #[test]
    fn only_journalists_and_editors_are_staff_roles() {
        assert!(!Role::Reader.is_staff_role());
        assert!(Role::Journalist.is_staff_role());
        assert!(Role::Editor.is_staff_role());
    }
}
