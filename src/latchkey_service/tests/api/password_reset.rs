use serde_json::json;

use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn unknown_user_gets_201_without_an_email() {
    let app = TestApp::new().await;

    let response = app
        .post_password_reset_request(&json!({ "email": "nobody@example.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    assert!(app.notifier.sent().await.is_empty());
}

#[tokio::test]
async fn reset_token_replaces_password_once() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "old-password", json!({ "name": "Ada" }))
        .await;

    let response = app
        .post_password_reset_request(&json!({ "email": "user@example.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let reset_token = app.mailed_reset_token("user@example.com").await.unwrap();
    assert_eq!(reset_token.len(), 64);

    let body = json!({
        "email": "user@example.com",
        "reset_token": reset_token,
        "password": "new-password",
    });
    let response = app.post_password_reset(&body).await;
    assert_eq!(response.status().as_u16(), 204);

    let reused = app.post_password_reset(&body).await;
    assert_eq!(reused.status().as_u16(), 401);

    app.login("user@example.com", "new-password").await;
    let old = app
        .post_login(&json!({ "email": "user@example.com", "password": "old-password" }))
        .await;
    assert_eq!(old.status().as_u16(), 401);
}

#[tokio::test]
async fn malformed_reset_token_is_a_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .post_password_reset(&json!({
            "email": "user@example.com",
            "reset_token": "not-hex",
            "password": "new-password",
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(error_message(response).await.contains("hex"));
}

#[tokio::test]
async fn unknown_reset_token_is_unauthorized() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "old-password", json!({}))
        .await;

    let response = app
        .post_password_reset(&json!({
            "email": "user@example.com",
            "reset_token": "0".repeat(64),
            "password": "new-password",
        }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn missing_fields_are_bad_requests() {
    let app = TestApp::new().await;

    let test_cases = [
        json!({ "reset_token": "0".repeat(64), "password": "pw" }),
        json!({ "email": "user@example.com", "password": "pw" }),
        json!({ "email": "user@example.com", "reset_token": "0".repeat(64) }),
    ];

    for test_case in test_cases {
        let response = app.post_password_reset(&test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
    }
}
