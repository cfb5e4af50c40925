use actix_web::{http::StatusCode, test};
use entity::user::Role;
use serde_json::json;

mod common;
use common::{
    client::{TestClient, TEST_PASSWORD},
    TestContext,
};

fn registration(username: &str, passwords: serde_json::Value) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{username}@news.test"),
        "password1": "s3cure-newsroom",
        "password2": "s3cure-newsroom",
        "publisher_passwords": passwords,
    })
}

#[tokio::test]
async fn test_journalist_registration_requires_matching_passphrase() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/register/journalist/")
        .set_json(registration("wrongpass", json!({"ActualToday": "SportToday"})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Incorrect access password for ActualToday."));
    assert!(!ctx.db.user_exists_by_username("wrongpass").await.unwrap());

    let req = test::TestRequest::post()
        .uri("/register/journalist/")
        .set_json(registration("rightpass", json!({"ActualToday": "ActualToday"})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "JOURNALIST");
    assert_eq!(body["redirect"], "/journalist/dashboard/");

    let user_id = body["user_id"].as_i64().unwrap() as i32;
    let publishers = ctx.db.publishers_for_user(user_id).await.unwrap();
    assert_eq!(publishers.len(), 1);
    assert_eq!(publishers[0].name, "ActualToday");
}

#[tokio::test]
async fn test_staff_registration_without_publisher_is_rejected() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/register/editor/")
        .set_json(registration("nopub", json!({})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/register/editor/")
        .set_json(registration(
            "twopubs",
            json!({"ActualToday": "ActualToday", "SportToday": "SportToday"}),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "As an Editor, you can only join one publisher.");
}

#[tokio::test]
async fn test_reader_registration_ignores_publishers_and_rejects_duplicates() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/register/reader/")
        .set_json(registration("avid", json!({"ActualToday": "wrong"})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["redirect"], "/");
    assert_eq!(
        body["message"],
        "Welcome to Daily News! You are registered as a Reader."
    );

    let req = test::TestRequest::post()
        .uri("/register/reader/")
        .set_json(registration("avid", json!({})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("A user with that username already exists."));
}

#[tokio::test]
async fn test_login_logout_cycle() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let editor = client.create_user(Role::Editor, &[]).await;

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({"username": editor.username, "password": "nope-nope-nope"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({"username": editor.username, "password": TEST_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["redirect"], "/editor/dashboard/");
    let token = body["token"].as_str().unwrap().to_string();

    // Logging in again replaced the token the helper issued.
    let req = test::TestRequest::get()
        .uri("/profile/")
        .insert_header(editor.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/logout/")
        .insert_header(("Authorization", format!("Token {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/profile/")
        .insert_header(("Authorization", format!("Token {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let reader = client.create_user(Role::Reader, &[]).await;

    let code = ctx.db.create_password_reset(reader.id).await.unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/reset/{}/{}/", reader.id, "bogus"))
        .set_json(json!({"new_password1": "fresh-start-2025", "new_password2": "fresh-start-2025"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/reset/{}/{}/", reader.id, code))
        .set_json(json!({"new_password1": "fresh-start-2025", "new_password2": "fresh-start-2025"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(ctx
        .db
        .authenticate_password(&reader.username, "fresh-start-2025")
        .await
        .is_ok());
    // Codes are single use.
    let req = test::TestRequest::post()
        .uri(&format!("/reset/{}/{}/", reader.id, code))
        .set_json(json!({"new_password1": "another-one-2025", "new_password2": "another-one-2025"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_reset_covers_every_account_sharing_an_email() {
    use dailynews::types::user::DBUserCreate;
    use dailynews::utils::token::encrypt;
    use entity::password_reset::{Column, Entity as PasswordReset};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let mut ids = Vec::new();
    for username in ["shared-one", "shared-two"] {
        let user = ctx
            .db
            .create_user(
                DBUserCreate {
                    username: username.to_string(),
                    email: "family@news.test".to_string(),
                    first_name: String::new(),
                    last_name: String::new(),
                    password: encrypt(TEST_PASSWORD).unwrap(),
                    role: Role::Reader,
                    profile_photo: None,
                    is_staff: false,
                    is_superuser: false,
                },
                &[],
            )
            .await
            .unwrap();
        ids.push(user.id);
    }

    let req = test::TestRequest::post()
        .uri("/password_reset/")
        .set_json(json!({"email": "family@news.test"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for id in ids {
        let codes = PasswordReset::find()
            .filter(Column::UserId.eq(id))
            .count(ctx.db.connection())
            .await
            .unwrap();
        assert_eq!(codes, 1, "user {id} should have one reset code");
    }

    let req = test::TestRequest::post()
        .uri("/password_reset/")
        .set_json(json!({"email": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
