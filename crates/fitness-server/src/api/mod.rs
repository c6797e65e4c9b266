//! HTTP routes for the advisor
//!
//! HTML pages for the browser form plus a small JSON API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod errors;
pub mod health;
pub mod pages;
pub mod recommendations;

use crate::server::AdvisorServer;

/// Build the router for all endpoints
pub fn build_router(server: Arc<AdvisorServer>) -> Router {
    Router::new()
        // Browser form
        .route("/", get(pages::index))
        .route("/plan", post(pages::generate_plan))
        .route("/seed", post(pages::populate_exercises))

        // JSON API
        .route("/api/v1/recommendations", post(recommendations::create_recommendation))

        // Health check
        .route("/health", get(health::health_check))

        .layer(TraceLayer::new_for_http())
        .with_state(server)
}
