use axum::{response::IntoResponse, routing::get, Json, Router};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "index": "Welcome to the Newsletter RESTful API"
    }))
}
