pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/score", post(handlers::handle_score))
        .route("/api/v1/score/batch", post(handlers::handle_score_batch))
        .route("/api/v1/profile", get(handlers::handle_profile_summary))
        .with_state(state)
}
