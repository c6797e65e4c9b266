//! HTML page handlers

use std::sync::Arc;

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tracing::warn;

use fitness_kb::{CoreError, SeedOutcome};

use crate::server::AdvisorServer;
use crate::ui::{render_page, PageView};

#[derive(Debug, Deserialize)]
pub struct PlanForm {
    #[serde(default)]
    pub goal: String,
}

pub async fn index() -> Html<String> {
    Html(render_page(&PageView::empty()))
}

/// Form submission from "Generate Plan"
pub async fn generate_plan(
    State(server): State<Arc<AdvisorServer>>,
    Form(form): Form<PlanForm>,
) -> Html<String> {
    let view = match server.recommend(&form.goal).await {
        Ok(plan) => PageView::with_plan(form.goal, plan),
        Err(CoreError::ValidationError(message)) => PageView::rejected(form.goal, message),
        // recommend only fails validation; anything else is still shown as a rejection
        Err(other) => {
            warn!("Unexpected pipeline error: {}", other);
            PageView::rejected(form.goal, other.to_string())
        }
    };
    Html(render_page(&view))
}

/// Sidebar "Populate Exercise Data"
pub async fn populate_exercises(State(server): State<Arc<AdvisorServer>>) -> Html<String> {
    let notice = match server.seed().await {
        Ok(SeedOutcome::AlreadyPopulated) => "Data already exists in the vector store.".to_string(),
        Ok(SeedOutcome::Seeded { inserted }) => format!("Populated {} exercises.", inserted),
        Err(e) => {
            warn!("Seeding failed: {}", e);
            format!("Seeding failed: {}", e)
        }
    };
    Html(render_page(&PageView::with_notice(notice)))
}
