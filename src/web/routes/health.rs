use axum::Json;
use serde_json::{json, Value};

// Stamped by build.rs so a running server shows which binary it is.
const BUILD_ID: &str = env!("EASTSYRIA_BUILD_ID");

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok", "buildId": BUILD_ID }))
}
