//! Axum route handlers for the Preferences API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::preferences::{category_aliases, resolve_category, PreferenceSnapshot};
use crate::scoring::category::Category;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetWeightRequest {
    pub weight: Value,
}

#[derive(Debug, Deserialize)]
pub struct SetThresholdRequest {
    pub score_threshold: Value,
}

#[derive(Debug, Serialize)]
pub struct ThresholdResponse {
    /// Profile override, if one is set.
    pub score_threshold: Option<f64>,
    pub default_threshold: f64,
    pub effective_threshold: f64,
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub name: Category,
    pub aliases: Vec<&'static str>,
    /// Job fields this category matches against.
    pub fields: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

/// GET /api/v1/preferences
pub async fn handle_get_preferences(State(state): State<AppState>) -> Json<PreferenceSnapshot> {
    Json(state.preferences.snapshot().await)
}

/// GET /api/v1/preferences/categories
///
/// Lists the editable categories in scoring order.
pub async fn handle_list_categories() -> Json<CategoriesResponse> {
    let categories = Category::ALL
        .into_iter()
        .map(|name| CategoryInfo {
            name,
            aliases: category_aliases(name),
            fields: name.field_paths(),
        })
        .collect();
    Json(CategoriesResponse { categories })
}

/// GET /api/v1/preferences/threshold
///
/// Reports the profile override alongside the configured default.
pub async fn handle_get_threshold(State(state): State<AppState>) -> Json<ThresholdResponse> {
    let profile = state.preferences.profile().await;
    let default_threshold = state.config.score_threshold;
    Json(ThresholdResponse {
        score_threshold: profile.score_threshold(),
        default_threshold,
        effective_threshold: profile.effective_threshold(default_threshold),
    })
}

/// PUT /api/v1/preferences/:category/:term
///
/// Category synonyms ("skill", "seniority", ...) are accepted.
pub async fn handle_set_weight(
    State(state): State<AppState>,
    Path((category, term)): Path<(String, String)>,
    Json(request): Json<SetWeightRequest>,
) -> Result<Json<PreferenceSnapshot>, AppError> {
    let category = resolve_category(&category)?;
    let (weight, snapshot) = state
        .preferences
        .update(|profile| profile.set_weight(category, &term, &request.weight))
        .await?;

    info!(%category, term = term.trim(), weight, "Preference weight set");
    Ok(Json(snapshot))
}

/// DELETE /api/v1/preferences/:category/:term
pub async fn handle_remove_term(
    State(state): State<AppState>,
    Path((category, term)): Path<(String, String)>,
) -> Result<Json<PreferenceSnapshot>, AppError> {
    let category = resolve_category(&category)?;
    let (removed, snapshot) = state
        .preferences
        .update(|profile| profile.remove_term(category, &term))
        .await?;

    if !removed {
        return Err(AppError::NotFound(format!(
            "No '{}' preference in {category}",
            term.trim()
        )));
    }

    info!(%category, term = term.trim(), "Preference term removed");
    Ok(Json(snapshot))
}

/// PUT /api/v1/preferences/threshold
pub async fn handle_set_threshold(
    State(state): State<AppState>,
    Json(request): Json<SetThresholdRequest>,
) -> Result<Json<PreferenceSnapshot>, AppError> {
    let (threshold, snapshot) = state
        .preferences
        .update(|profile| profile.set_score_threshold(&request.score_threshold))
        .await?;

    info!(threshold, "Score threshold set");
    Ok(Json(snapshot))
}

/// DELETE /api/v1/preferences/threshold
///
/// Reverts to the configured default threshold.
pub async fn handle_clear_threshold(
    State(state): State<AppState>,
) -> Result<Json<PreferenceSnapshot>, AppError> {
    let (_, snapshot) = state
        .preferences
        .update(|profile| Ok(profile.clear_score_threshold()))
        .await?;

    info!(
        default = state.config.score_threshold,
        "Score threshold cleared"
    );
    Ok(Json(snapshot))
}
