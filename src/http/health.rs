//! Liveness endpoint.

use axum::Json;
use serde_json::{Value, json};

/// Reports that the process is serving requests.
pub(super) async fn check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
