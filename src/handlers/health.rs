//! Health Check Handler
//!
//! GET /health liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// GET /health
///
/// Always answers `{"status":"ok"}` while the process is serving.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
