//! JSON recommendation endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use fitness_kb::Exercise;

use crate::api::errors::ApiError;
use crate::error::ServerError;
use crate::server::AdvisorServer;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub goal: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub goal: String,
    /// Never empty; holds the fallback or error sentinel when nothing matched
    pub exercises: Vec<Exercise>,
    /// Failure reason when `exercises` holds the error sentinel
    pub error: Option<String>,
}

pub async fn create_recommendation(
    State(server): State<Arc<AdvisorServer>>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let plan = server
        .recommend(&request.goal)
        .await
        .map_err(ServerError::from)?;

    Ok(Json(RecommendationResponse {
        goal: request.goal,
        exercises: plan.exercises().to_vec(),
        error: plan.failure().map(str::to_string),
    }))
}
