//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::debug;

use crate::server::AdvisorServer;

/// Reports the server version and vector store readiness.
/// Overall status is `DEGRADED` when the store is reachable but not ready,
/// and the answer is 503 when the store cannot be reached.
pub async fn health_check(State(server): State<Arc<AdvisorServer>>) -> impl IntoResponse {
    debug!("Health check requested");

    let store_status = match server.check_vector_store_health().await {
        Ok(true) => "UP",
        Ok(false) => "DEGRADED",
        Err(_) => "DOWN",
    };

    // Reachable but not ready still answers 200
    let (status_code, overall) = match store_status {
        "DOWN" => (StatusCode::SERVICE_UNAVAILABLE, "DOWN"),
        "DEGRADED" => (StatusCode::OK, "DEGRADED"),
        _ => (StatusCode::OK, "UP"),
    };

    let response = json!({
        "status": overall,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "vectorStore": { "status": store_status },
        },
    });

    (status_code, Json(response))
}
