pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::preferences::handlers as preferences;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Preferences API
        .route(
            "/api/v1/preferences",
            get(preferences::handle_get_preferences),
        )
        .route(
            "/api/v1/preferences/categories",
            get(preferences::handle_list_categories),
        )
        .route(
            "/api/v1/preferences/threshold",
            get(preferences::handle_get_threshold)
                .put(preferences::handle_set_threshold)
                .delete(preferences::handle_clear_threshold),
        )
        .route(
            "/api/v1/preferences/:category/:term",
            put(preferences::handle_set_weight).delete(preferences::handle_remove_term),
        )
        // Scoring API
        .route("/api/v1/jobs/score", post(scoring::handle_score_job))
        .route("/api/v1/jobs/score/batch", post(scoring::handle_score_batch))
        .with_state(state)
}
