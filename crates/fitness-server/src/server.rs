//! Advisor server: shared handles and the listener loop

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use fitness_kb::{
    services::{DataSeeder, ExerciseRecommender, GoalEncoder},
    traits::{EmbeddingGenerator, VectorStore},
    CoreError, Recommendation, SeedOutcome, TraceContext,
};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// State shared by every request handler.
///
/// The encoder and store are built once at startup. Pipeline runs are
/// serialized through `submission_gate` so one submission finishes before
/// the next starts.
#[derive(Clone)]
pub struct AdvisorServer {
    pub config: ServerConfig,
    recommender: Arc<ExerciseRecommender>,
    seeder: Arc<DataSeeder>,
    store: Arc<dyn VectorStore>,
    submission_gate: Arc<Mutex<()>>,
}

impl std::fmt::Debug for AdvisorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorServer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AdvisorServer {
    pub fn new(
        config: ServerConfig,
        embedding_generator: Arc<dyn EmbeddingGenerator>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        let encoder = GoalEncoder::new(embedding_generator);
        Self {
            config,
            recommender: Arc::new(ExerciseRecommender::new(encoder.clone(), store.clone())),
            seeder: Arc::new(DataSeeder::new(encoder, store.clone())),
            store,
            submission_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Run the recommendation pipeline for raw user input.
    #[instrument(skip(self, goal))]
    pub async fn recommend(&self, goal: &str) -> Result<Recommendation, CoreError> {
        let _gate = self.submission_gate.lock().await;
        let trace_ctx = TraceContext::new_root();
        let recommendation = self.recommender.recommend_text(goal, &trace_ctx).await;
        match &recommendation {
            Ok(r) if r.is_failure() => warn!(trace = %trace_ctx, "Plan generated with error sentinel"),
            Ok(_) => info!(trace = %trace_ctx, "Plan generated"),
            Err(e) => info!(trace = %trace_ctx, "Goal rejected: {}", e),
        }
        recommendation
    }

    /// Populate the exercise collection if it is empty.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<SeedOutcome, CoreError> {
        let _gate = self.submission_gate.lock().await;
        self.seeder.seed_if_empty(&TraceContext::new_root()).await
    }

    /// Readiness of the vector store
    pub async fn check_vector_store_health(&self) -> Result<bool, fitness_kb::VectorStoreError> {
        self.store.health_check().await
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn run(self) -> ServerResult<()> {
        info!("Starting fitness advisor");

        let app = crate::api::build_router(Arc::new(self.clone()));

        let listener = TcpListener::bind(self.config.listen_address()).await?;
        let addr = listener.local_addr()?;
        info!("Listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
