//! Preference-weighted job scoring.
//!
//! Every job is scored on its own against one preference profile:
//! nine category passes, then a description pass over `skills`, then a freshness bonus.
//! The sum is compared against the profile's threshold (or the configured default).
//!
//! `AppState` holds an `Arc<dyn JobScorer>`; `WeightedTermScorer` is the only backend.

pub mod aggregate;
pub mod category;
pub mod document;
pub mod handlers;
pub mod passes;
pub mod text;

use serde::Serialize;

use crate::preferences::PreferenceProfile;

pub use aggregate::{enrich_jobs_with_score, ScoredJob};
pub use document::Job;

// ────────────────────────────────────────────────────────────────────────────
// Match evidence
// ────────────────────────────────────────────────────────────────────────────

/// One preference term that hit one job field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermMatch {
    pub category: &'static str,
    pub field: &'static str,
    /// The field value as it appeared in the job, before normalization.
    pub value: String,
    pub pref_key: String,
    pub weight: f64,
}

/// The freshness bonus, with the posting's age at scoring time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreshnessMatch {
    pub category: &'static str,
    pub age_days: f64,
    pub weight: f64,
}

/// Evidence for one contribution to a job's score, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchDetail {
    Term(TermMatch),
    Freshness(FreshnessMatch),
}

#[cfg(test)]
impl MatchDetail {
    pub fn category(&self) -> &'static str {
        match self {
            MatchDetail::Term(m) => m.category,
            MatchDetail::Freshness(m) => m.category,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            MatchDetail::Term(m) => m.weight,
            MatchDetail::Freshness(m) => m.weight,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer trait
// ────────────────────────────────────────────────────────────────────────────

/// Scores a batch of jobs against one profile snapshot.
pub trait JobScorer: Send + Sync {
    fn score_jobs(&self, jobs: &[Job], profile: &PreferenceProfile) -> Vec<ScoredJob>;

    /// Label reported alongside results.
    fn backend(&self) -> &'static str;
}

/// Weighted term matching with a configured fallback threshold.
pub struct WeightedTermScorer {
    pub default_threshold: f64,
}

impl WeightedTermScorer {
    pub fn new(default_threshold: f64) -> Self {
        Self { default_threshold }
    }
}

impl JobScorer for WeightedTermScorer {
    fn score_jobs(&self, jobs: &[Job], profile: &PreferenceProfile) -> Vec<ScoredJob> {
        enrich_jobs_with_score(jobs, profile, self.default_threshold)
    }

    fn backend(&self) -> &'static str {
        "weighted_terms"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_match_serializes_flat() {
        let detail = MatchDetail::Term(TermMatch {
            category: "skills",
            field: "skill_requirements.skill.name",
            value: "WBS".to_string(),
            pref_key: "wbs".to_string(),
            weight: 2.0,
        });
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "category": "skills",
                "field": "skill_requirements.skill.name",
                "value": "WBS",
                "pref_key": "wbs",
                "weight": 2.0
            })
        );
    }

    #[test]
    fn test_freshness_match_serializes_age() {
        let detail = MatchDetail::Freshness(FreshnessMatch {
            category: "freshness",
            age_days: 1.25,
            weight: 3.0,
        });
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({ "category": "freshness", "age_days": 1.25, "weight": 3.0 })
        );
        assert_eq!(detail.category(), "freshness");
        assert_eq!(detail.weight(), 3.0);
    }

    #[test]
    fn test_weighted_term_scorer_uses_default_threshold() {
        let scorer = WeightedTermScorer::new(2.0);
        let jobs: Vec<Job> = vec![
            serde_json::from_value(json!({ "id": 1, "title": "Planning Engineer" })).unwrap(),
            serde_json::from_value(json!({ "id": 2, "title": "Accountant" })).unwrap(),
        ];
        let profile: PreferenceProfile =
            serde_json::from_value(json!({ "roles": { "engineer": 2 } })).unwrap();

        let scored = scorer.score_jobs(&jobs, &profile);
        assert!(scored[0].is_match);
        assert!(!scored[1].is_match);
        assert_eq!(scorer.backend(), "weighted_terms");
    }
}
