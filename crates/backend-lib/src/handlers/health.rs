//! Liveness probe.

use axum::Json;
use tokengate_common::Health;

/// GET /health
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
