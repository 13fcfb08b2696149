use axum::response::Json;
use serde_json::{Value, json};

// handlers/health.rs
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
