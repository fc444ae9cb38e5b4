use serde_json::json;

use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn should_return_200_with_token_pair() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "password123", json!({ "role": "admin" }))
        .await;

    let (access_token, refresh_token) = app.login("user@example.com", "password123").await;

    assert_eq!(access_token.split('.').count(), 3);
    assert_eq!(refresh_token.split('.').count(), 3);
    assert_ne!(access_token, refresh_token);
}

#[tokio::test]
async fn should_return_401_with_one_message_for_bad_credentials() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "password123", json!({}))
        .await;

    let wrong_password = app
        .post_login(&json!({ "email": "user@example.com", "password": "wrong" }))
        .await;
    let unknown_user = app
        .post_login(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_user.status().as_u16(), 401);
    assert_eq!(
        error_message(wrong_password).await,
        error_message(unknown_user).await
    );
}

#[tokio::test]
async fn should_return_400_for_missing_fields() {
    let app = TestApp::new().await;

    let test_cases = [
        json!({ "email": "user@example.com" }),
        json!({ "password": "password123" }),
        json!({ "email": "", "password": "password123" }),
        json!({ "email": "user@example.com", "password": "" }),
    ];

    for test_case in test_cases {
        let response = app.post_login(&test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
    }
}

#[tokio::test]
async fn should_return_400_for_invalid_json() {
    let app = TestApp::new().await;

    let response = app.post_raw("/v1/auth/login", "{not json").await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(!error_message(response).await.is_empty());
}
