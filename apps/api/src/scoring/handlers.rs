//! Axum route handlers for the Scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::digest::render_match_digest;
use crate::errors::AppError;
use crate::preferences::PreferenceProfile;
use crate::scoring::{Job, ScoredJob};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreJobRequest {
    pub job: Job,
    /// Scores against this profile instead of the stored one.
    pub preferences: Option<PreferenceProfile>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreBatchRequest {
    pub jobs: Vec<Job>,
    pub preferences: Option<PreferenceProfile>,
}

#[derive(Debug, Serialize)]
pub struct ScoreBatchResponse {
    pub scored: Vec<ScoredJob>,
    pub matched: usize,
    /// Rendered summaries of the matched jobs, in input order.
    pub digests: Vec<String>,
    pub scorer_backend: String,
}

async fn resolve_profile(state: &AppState, supplied: Option<PreferenceProfile>) -> PreferenceProfile {
    match supplied {
        Some(profile) => profile,
        None => state.preferences.profile().await,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/score
pub async fn handle_score_job(
    State(state): State<AppState>,
    Json(request): Json<ScoreJobRequest>,
) -> Result<Json<ScoredJob>, AppError> {
    let profile = resolve_profile(&state, request.preferences).await;

    let scored = state
        .scorer
        .score_jobs(std::slice::from_ref(&request.job), &profile)
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("scorer returned no result")))?;

    Ok(Json(scored))
}

/// POST /api/v1/jobs/score/batch
///
/// Scores every job independently and renders digests for the matches.
pub async fn handle_score_batch(
    State(state): State<AppState>,
    Json(request): Json<ScoreBatchRequest>,
) -> Result<Json<ScoreBatchResponse>, AppError> {
    if request.jobs.is_empty() {
        return Err(AppError::Validation("jobs cannot be empty".to_string()));
    }

    let profile = resolve_profile(&state, request.preferences).await;
    let scored = state.scorer.score_jobs(&request.jobs, &profile);

    let digests: Vec<String> = scored
        .iter()
        .filter(|s| s.is_match)
        .map(render_match_digest)
        .collect();

    info!(
        "Scoring cycle complete. Scored: {}. Matches: {}",
        scored.len(),
        digests.len()
    );

    Ok(Json(ScoreBatchResponse {
        matched: digests.len(),
        scored,
        digests,
        scorer_backend: state.scorer.backend().to_string(),
    }))
}
