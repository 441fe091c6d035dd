use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::scoring::profile_index::IndexSummary;
use crate::scoring::result::ScoringResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BatchScoreRequest {
    pub jobs: Vec<JobPosting>,
    /// When set, the response lists which results clear this score.
    #[serde(default)]
    pub min_fit_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct BatchScoreResponse {
    pub results: Vec<ScoringResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above_threshold: Option<Vec<usize>>,
}

#[derive(Debug, Serialize)]
pub struct ProfileSummaryResponse {
    pub keywords: IndexSummary,
    pub semantic_provider: bool,
}

/// POST /api/v1/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(job): Json<JobPosting>,
) -> Result<Json<ScoringResult>, AppError> {
    Ok(Json(state.engine.score(&job).await))
}

/// POST /api/v1/score/batch
/// Each posting is scored on its own task; results keep the request order.
pub async fn handle_score_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchScoreRequest>,
) -> Result<Json<BatchScoreResponse>, AppError> {
    if req.jobs.is_empty() {
        return Err(AppError::Validation("jobs must not be empty".to_string()));
    }
    if req.jobs.len() > state.config.max_batch_size {
        return Err(AppError::Validation(format!(
            "at most {} jobs per batch, got {}",
            state.config.max_batch_size,
            req.jobs.len()
        )));
    }
    if let Some(min) = req.min_fit_score {
        if !(0.0..=100.0).contains(&min) {
            return Err(AppError::Validation(
                "min_fit_score must be between 0 and 100".to_string(),
            ));
        }
    }

    let total = req.jobs.len();
    let mut tasks = JoinSet::new();
    for (position, job) in req.jobs.into_iter().enumerate() {
        let engine = state.engine.clone();
        tasks.spawn(async move { (position, engine.score(&job).await) });
    }

    let mut slots: Vec<Option<ScoringResult>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (position, result) =
            joined.map_err(|e| anyhow::anyhow!("scoring task failed: {e}"))?;
        slots[position] = Some(result);
    }
    let results = slots
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| anyhow::anyhow!("scoring task produced no result"))?;

    let above_threshold = req.min_fit_score.map(|min| {
        results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.meets_threshold(min))
            .map(|(i, _)| i)
            .collect()
    });

    Ok(Json(BatchScoreResponse {
        results,
        above_threshold,
    }))
}

/// GET /api/v1/profile
pub async fn handle_profile_summary(
    State(state): State<AppState>,
) -> Json<ProfileSummaryResponse> {
    Json(ProfileSummaryResponse {
        keywords: state.engine.index().summary(),
        semantic_provider: state.engine.has_semantic_provider(),
    })
}
