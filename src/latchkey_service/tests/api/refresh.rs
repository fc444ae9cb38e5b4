use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn refresh_token_is_single_use() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "password123", json!({}))
        .await;
    let (_, refresh_token) = app.login("user@example.com", "password123").await;

    let first = app
        .post_refresh(&json!({ "refresh_token": refresh_token }))
        .await;
    assert_eq!(first.status().as_u16(), 200);
    let body: Value = first.json().await.unwrap();
    let rotated = body["refresh_token"].as_str().unwrap();
    assert_ne!(rotated, refresh_token);

    let second = app
        .post_refresh(&json!({ "refresh_token": refresh_token }))
        .await;
    assert_eq!(second.status().as_u16(), 401);

    let with_rotated = app
        .post_refresh(&json!({ "refresh_token": rotated }))
        .await;
    assert_eq!(with_rotated.status().as_u16(), 200);
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "password123", json!({}))
        .await;
    let (access_token, _) = app.login("user@example.com", "password123").await;

    let response = app
        .post_refresh(&json!({ "refresh_token": access_token }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_refresh(&json!({ "refresh_token": "not-a-token" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn missing_token_is_a_bad_request() {
    let app = TestApp::new().await;

    let response = app.post_refresh(&json!({})).await;

    assert_eq!(response.status().as_u16(), 400);
}
