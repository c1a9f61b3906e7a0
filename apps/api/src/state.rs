use std::sync::Arc;

use crate::config::Config;
use crate::preferences::PreferenceStore;
use crate::scoring::JobScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable scorer. Default: WeightedTermScorer with `config.score_threshold`.
    pub scorer: Arc<dyn JobScorer>,
    /// Active preference profile, held in memory only.
    pub preferences: PreferenceStore,
}
