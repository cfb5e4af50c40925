use actix_web::{http::StatusCode, test};
use entity::{article::ArticleStatus, user::Role};
use serde_json::json;

mod common;
use common::{client::TestClient, TestContext};

#[tokio::test]
async fn test_submit_review_and_publish() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let actual = client.publisher_id("ActualToday").await;
    let journalist = client.create_user(Role::Journalist, &[actual]).await;
    let editor = client.create_user(Role::Editor, &[actual]).await;

    let req = test::TestRequest::post()
        .uri("/article/create/")
        .insert_header(journalist.auth_header())
        .set_json(json!({
            "title": "Harbour reopens",
            "body": "After two years the harbour is open again.",
            "action": "submit_publisher",
            "publisher_to_submit": actual,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["article"]["status"], "AWAITING_REVIEW");
    assert_eq!(body["article"]["is_approved"], false);
    assert_eq!(body["message"], "Article 'Harbour reopens' submitted to ActualToday for review.");
    let article_id = body["article"]["id"].as_i64().unwrap() as i32;

    // Submitted work is with the editor now.
    let req = test::TestRequest::post()
        .uri(&format!("/article/edit/{article_id}/"))
        .insert_header(journalist.auth_header())
        .set_json(json!({"title": "Changed", "body": "Changed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/editor/dashboard/")
        .insert_header(editor.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["articles_to_review"][0]["id"], article_id);

    let req = test::TestRequest::post()
        .uri(&format!("/article/review/{article_id}/"))
        .insert_header(editor.auth_header())
        .set_json(json!({"action": "publish", "title": "Harbour reopens to ships"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["article"]["status"], "PUBLISHED");
    assert_eq!(body["article"]["is_approved"], true);
    assert_eq!(body["article"]["editor_id"], editor.id);

    let stored = ctx.db.get_article(article_id).await.unwrap();
    assert_eq!(stored.title, "Harbour reopens to ships");
    assert_eq!(stored.status, ArticleStatus::Published);
    assert!(stored.is_approved);
    assert!(stored.publication_date.is_some());

    // Finalized articles cannot be deleted through the workflow.
    let req = test::TestRequest::post()
        .uri(&format!("/article/delete/{article_id}/"))
        .insert_header(journalist.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_bad_submission_falls_back_to_draft() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let actual = client.publisher_id("ActualToday").await;
    let sport = client.publisher_id("SportToday").await;
    let journalist = client.create_user(Role::Journalist, &[actual]).await;

    let req = test::TestRequest::post()
        .uri("/article/create/")
        .insert_header(journalist.auth_header())
        .set_json(json!({
            "title": "Derby day",
            "body": "Tickets sold out.",
            "action": "submit_publisher",
            "publisher_to_submit": sport,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["article"]["status"], "DRAFT");
    assert_eq!(body["error"], "Invalid publisher selected.");
    let article_id = body["article"]["id"].as_i64().unwrap() as i32;

    let req = test::TestRequest::post()
        .uri(&format!("/article/edit/{article_id}/"))
        .insert_header(journalist.auth_header())
        .set_json(json!({"title": "Derby day", "body": "Tickets sold out.", "action": "publish_independent"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["article"]["status"], "PUBLISHED");
    assert!(body["article"]["publisher"].is_null());
    assert_eq!(body["message"], "Article 'Derby day' published successfully!");
}

#[tokio::test]
async fn test_role_gates_and_ownership() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let actual = client.publisher_id("ActualToday").await;
    let sport = client.publisher_id("SportToday").await;
    let author = client.create_user(Role::Journalist, &[actual]).await;
    let other = client.create_user(Role::Journalist, &[actual]).await;
    let reader = client.create_user(Role::Reader, &[]).await;
    let outside_editor = client.create_user(Role::Editor, &[sport]).await;

    let draft = client.create_article(author.id, "Notes", ArticleStatus::Draft, None).await;
    let queued = client
        .create_article(author.id, "Queued", ArticleStatus::AwaitingReview, Some(actual))
        .await;

    let req = test::TestRequest::get().uri("/journalist/dashboard/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/journalist/dashboard/")
        .insert_header(reader.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/article/view/journalist/{}/", draft.id))
        .insert_header(other.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/article/review/{}/", queued.id))
        .insert_header(outside_editor.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/article/view/journalist/{}/", draft.id))
        .insert_header(author.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(ctx.db.get_article(draft.id).await.is_err());
}

#[tokio::test]
async fn test_reader_pages_only_show_published_articles() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let actual = client.publisher_id("ActualToday").await;
    let journalist = client.create_user(Role::Journalist, &[actual]).await;
    let reader = client.create_user(Role::Reader, &[]).await;

    let draft = client.create_article(journalist.id, "Unfinished", ArticleStatus::Draft, None).await;
    let live = client
        .create_article(journalist.id, "Live", ArticleStatus::Published, Some(actual))
        .await;
    assert!(live.is_approved);

    let req = test::TestRequest::get()
        .uri(&format!("/article/{}/", draft.id))
        .insert_header(reader.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "This article is not yet available for reading.");

    let req = test::TestRequest::get()
        .uri(&format!("/article/{}/", live.id))
        .insert_header(reader.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["is_subscribed"], false);

    let req = test::TestRequest::get().uri("/articles/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_editor_rejects_submission() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let actual = client.publisher_id("ActualToday").await;
    let journalist = client.create_user(Role::Journalist, &[actual]).await;
    let editor = client.create_user(Role::Editor, &[actual]).await;
    let queued = client
        .create_article(journalist.id, "Rumour mill", ArticleStatus::AwaitingReview, Some(actual))
        .await;

    let req = test::TestRequest::post()
        .uri(&format!("/article/review/{}/", queued.id))
        .insert_header(editor.auth_header())
        .set_json(json!({"action": "reject"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Article 'Rumour mill' was rejected.");
    assert_eq!(body["article"]["status"], "REJECTED");
    assert_eq!(body["article"]["is_approved"], false);
    assert_eq!(body["article"]["editor_id"], editor.id);

    let stored = ctx.db.get_article(queued.id).await.unwrap();
    assert_eq!(stored.status, ArticleStatus::Rejected);
    assert!(!stored.is_approved);
    assert!(stored.publication_date.is_none());

    // Rejected work is finalized for the author.
    let req = test::TestRequest::post()
        .uri(&format!("/article/delete/{}/", queued.id))
        .insert_header(journalist.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_affiliated_editor_deletes_pending_article() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let actual = client.publisher_id("ActualToday").await;
    let sport = client.publisher_id("SportToday").await;
    let journalist = client.create_user(Role::Journalist, &[actual]).await;
    let editor = client.create_user(Role::Editor, &[actual]).await;
    let outside_editor = client.create_user(Role::Editor, &[sport]).await;
    let queued = client
        .create_article(journalist.id, "Late filing", ArticleStatus::AwaitingReview, Some(actual))
        .await;
    let independent = client
        .create_article(journalist.id, "Own blog", ArticleStatus::Draft, None)
        .await;

    let req = test::TestRequest::post()
        .uri(&format!("/article/delete/{}/", queued.id))
        .insert_header(outside_editor.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // No publisher means no editor has a say.
    let req = test::TestRequest::post()
        .uri(&format!("/article/delete/{}/", independent.id))
        .insert_header(editor.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/article/delete/{}/", queued.id))
        .insert_header(editor.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Article 'Late filing' was successfully deleted.");
    assert!(ctx.db.get_article(queued.id).await.is_err());
    assert!(ctx.db.get_article(independent.id).await.is_ok());
}

#[tokio::test]
async fn test_independent_article_reaches_readers() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let journalist = client.create_user(Role::Journalist, &[]).await;
    let reader = client.create_user(Role::Reader, &[]).await;

    let req = test::TestRequest::post()
        .uri("/article/create/")
        .insert_header(journalist.auth_header())
        .set_json(json!({
            "title": "Field notes",
            "body": "Written without a masthead.",
            "action": "publish_independent",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["article"]["status"], "PUBLISHED");
    assert_eq!(body["article"]["is_approved"], true);
    assert!(body["article"]["publisher"].is_null());
    assert!(body["article"]["editor_id"].is_null());
    assert!(!body["article"]["publication_date"].is_null());
    let article_id = body["article"]["id"].as_i64().unwrap() as i32;

    let req = test::TestRequest::get().uri("/articles/").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["id"], article_id);

    let req = test::TestRequest::get()
        .uri(&format!("/article/{article_id}/"))
        .insert_header(reader.auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Published independent work is finalized.
    let req = test::TestRequest::post()
        .uri(&format!("/article/edit/{article_id}/"))
        .insert_header(journalist.auth_header())
        .set_json(json!({"title": "Field notes v2", "body": "Edited."}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
