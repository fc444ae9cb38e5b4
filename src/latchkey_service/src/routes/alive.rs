use axum::{Json, response::IntoResponse};
use serde_json::json;

pub async fn alive() -> impl IntoResponse {
    Json(json!({ "alive": true }))
}
