use std::collections::BTreeMap;

use entity::user::{Model as UserModel, Role};
use serde::{Deserialize, Serialize};

use crate::types::publisher::PublisherRef;

#[derive(Serialize, Deserialize, Debug)]
pub struct RLogin {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRes {
    pub token: String,
    pub user_id: i32,
    pub role: Role,
    pub redirect: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RRegister {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub profile_photo: Option<String>,
    /// Publisher name to join password. Only read for staff roles.
    #[serde(default)]
    pub publisher_passwords: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterRes {
    pub user_id: i32,
    pub token: String,
    pub role: Role,
    pub redirect: String,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct RegisterOptions {
    pub roles: Vec<Role>,
    pub publishers: Vec<PublisherRef>,
}

/// Insert payload for the user table. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct DBUserCreate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Role,
    pub profile_photo: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_photo: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub profile_photo: Option<String>,
    pub publishers: Vec<PublisherRef>,
}

impl UserProfile {
    pub fn new(user: UserModel, publishers: Vec<PublisherRef>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            profile_photo: user.profile_photo,
            publishers,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPasswordReset {
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPasswordResetConfirm {
    pub new_password1: String,
    pub new_password2: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct JournalistSummary {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_photo: Option<String>,
    pub article_count: u64,
}

#[derive(Serialize, Debug)]
pub struct JournalistProfile {
    pub journalist: JournalistSummary,
    pub subscriber_count: u64,
    pub is_subscribed: bool,
    pub published_articles: Vec<crate::types::article::ArticleView>,
}

/// Fields an administrator may change on an account.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RAdminUserUpdate {
    pub role: Option<Role>,
    pub publishers: Option<Vec<i32>>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

#[derive(Serialize, Debug)]
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub publishers: Vec<PublisherRef>,
}
