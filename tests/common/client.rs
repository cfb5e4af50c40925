use std::sync::Arc;

use actix_web::{web, App};
use dailynews::{
    db::{article::ArticleContent, mariadb_service::MariaDbService},
    types::user::DBUserCreate,
    utils::{mail::Notifier, token::encrypt},
};
use entity::{
    article::{ArticleStatus, Model as ArticleModel},
    user::Role,
};
use uuid::Uuid;

use super::get_test_config;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub struct TestClient {
    pub db: Arc<MariaDbService>,
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: i32,
    pub username: String,
    pub token: String,
}

#[allow(dead_code)]
impl TestUser {
    pub fn auth_header(&self) -> (&'static str, String) {
        ("Authorization", format!("Token {}", self.token))
    }
}

impl TestClient {
    pub fn new(db: Arc<MariaDbService>) -> Self {
        TestClient { db }
    }

    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let notifier = Notifier::new(&get_test_config()).expect("Failed to build notifier");
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(notifier))
            .configure(dailynews::routes::configure_routes)
    }

    /// Creates an active user with a fresh token. `publishers` are affiliations.
    pub async fn create_user(&self, role: Role, publishers: &[i32]) -> TestUser {
        let username = format!("{}-{}", role.as_str().to_lowercase(), &Uuid::new_v4().simple().to_string()[..8]);
        let user = self
            .db
            .create_user(
                DBUserCreate {
                    username: username.clone(),
                    email: format!("{username}@test.com"),
                    first_name: String::new(),
                    last_name: String::new(),
                    password: encrypt(TEST_PASSWORD).expect("Failed to hash password"),
                    role,
                    profile_photo: None,
                    is_staff: false,
                    is_superuser: false,
                },
                publishers,
            )
            .await
            .expect("Failed to create user");
        let token = self.db.issue_token(user.id).await.expect("Failed to issue token");
        TestUser { id: user.id, username, token }
    }

    #[allow(dead_code)]
    pub async fn publisher_id(&self, name: &str) -> i32 {
        self.db
            .publishers_by_name()
            .await
            .expect("Failed to list publishers")
            .get(name)
            .map(|p| p.id)
            .expect("Seed publisher missing")
    }

    #[allow(dead_code)]
    pub async fn create_article(
        &self,
        author_id: i32,
        title: &str,
        status: ArticleStatus,
        publisher_id: Option<i32>,
    ) -> ArticleModel {
        self.db
            .insert_article(
                author_id,
                ArticleContent {
                    title: title.to_string(),
                    body: format!("Body of {title}"),
                    featured_image: None,
                },
                status,
                publisher_id,
            )
            .await
            .expect("Failed to create article")
    }
}
