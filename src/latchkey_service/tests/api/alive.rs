use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn alive_returns_200() {
    let app = TestApp::new().await;

    let response = app.get_alive().await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "alive": true }));
}
