use reqwest::Method;
use serde_json::{Value, json};

use crate::helpers::{ADMIN_USERNAME, TestApp};

#[tokio::test]
async fn requests_without_credentials_are_challenged() {
    let app = TestApp::new().await;

    let anonymous = app
        .http_client
        .get(format!("{}/v1/admin/users/user@example.com", &app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);
    assert!(anonymous.headers().contains_key("www-authenticate"));

    let wrong = app
        .http_client
        .get(format!("{}/v1/admin/users/user@example.com", &app.address))
        .basic_auth(ADMIN_USERNAME, Some("guess"))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status().as_u16(), 401);
}

#[tokio::test]
async fn admin_routes_are_absent_when_disabled() {
    let app = TestApp::without_admin_api().await;

    let response = app.admin(Method::GET, "/user@example.com").send().await.unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_masks_password_and_rejects_duplicates() {
    let app = TestApp::new().await;
    let body = json!({
        "email": "user@example.com",
        "password": "password123",
        "claims": { "role": "admin" },
    });

    let created = app.admin(Method::POST, "").json(&body).send().await.unwrap();
    assert_eq!(created.status().as_u16(), 201);
    let user: Value = created.json().await.unwrap();
    assert_eq!(user["email"], "user@example.com");
    assert_eq!(user["password"], "**********");
    assert_eq!(user["claims"], json!({ "role": "admin" }));

    let duplicate = app.admin(Method::POST, "").json(&body).send().await.unwrap();
    assert_eq!(duplicate.status().as_u16(), 409);
}

#[tokio::test]
async fn create_requires_email_and_password() {
    let app = TestApp::new().await;

    let test_cases = [
        json!({ "email": "user@example.com" }),
        json!({ "password": "password123" }),
        json!({ "email": "not-an-email", "password": "password123" }),
    ];

    for test_case in test_cases {
        let response = app
            .admin(Method::POST, "")
            .json(&test_case)
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
    }
}

#[tokio::test]
async fn get_returns_user_or_404() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "password123", json!({ "name": "Ada" }))
        .await;

    let found = app.admin(Method::GET, "/user@example.com").send().await.unwrap();
    assert_eq!(found.status().as_u16(), 200);
    let user: Value = found.json().await.unwrap();
    assert_eq!(user["password"], "**********");
    assert_eq!(user["claims"]["name"], "Ada");

    let missing = app.admin(Method::GET, "/nobody@example.com").send().await.unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "password123", json!({ "role": "user" }))
        .await;

    let claims_only = app
        .admin(Method::PUT, "/user@example.com")
        .json(&json!({ "claims": { "role": "admin" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(claims_only.status().as_u16(), 200);
    let user: Value = claims_only.json().await.unwrap();
    assert_eq!(user["claims"], json!({ "role": "admin" }));
    app.login("user@example.com", "password123").await;

    let password_only = app
        .admin(Method::PUT, "/user@example.com")
        .json(&json!({ "password": "new-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(password_only.status().as_u16(), 200);
    let user: Value = password_only.json().await.unwrap();
    assert_eq!(user["claims"], json!({ "role": "admin" }));
    app.login("user@example.com", "new-password").await;
}

#[tokio::test]
async fn update_rejects_email_change_and_unknown_user() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "password123", json!({}))
        .await;

    let email_change = app
        .admin(Method::PUT, "/user@example.com")
        .json(&json!({ "email": "other@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(email_change.status().as_u16(), 400);

    let missing = app
        .admin(Method::PUT, "/nobody@example.com")
        .json(&json!({ "claims": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_removes_user_and_its_tokens() {
    let app = TestApp::new().await;
    app.create_user("user@example.com", "password123", json!({}))
        .await;
    let (_, refresh_token) = app.login("user@example.com", "password123").await;

    let deleted = app
        .admin(Method::DELETE, "/user@example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    let again = app
        .admin(Method::DELETE, "/user@example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 404);

    let refresh = app
        .post_refresh(&json!({ "refresh_token": refresh_token }))
        .await;
    assert_eq!(refresh.status().as_u16(), 401);
}
