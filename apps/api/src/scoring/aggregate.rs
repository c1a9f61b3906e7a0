use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::preferences::PreferenceProfile;
use crate::scoring::category::Category;
use crate::scoring::document::Job;
use crate::scoring::passes::{score_category, score_description, score_freshness};
use crate::scoring::MatchDetail;

/// Keys the scorer writes onto a job; stale copies on the input are replaced.
const SCORE_KEYS: [&str; 3] = ["score", "match", "match_details"];

/// A job with its score, match decision and evidence alongside the original fields.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: Job,
    pub score: f64,
    #[serde(rename = "match")]
    pub is_match: bool,
    pub match_details: Vec<MatchDetail>,
}

/// Scores one job, appending evidence to `out_details`.
#[allow(dead_code)]
pub fn calculate_score(
    job: &Job,
    profile: &PreferenceProfile,
    out_details: &mut Vec<MatchDetail>,
) -> f64 {
    calculate_score_at(job, profile, Utc::now(), out_details)
}

/// `calculate_score` with an explicit clock for the freshness pass.
///
/// The total saturates at `f64::MAX` / `f64::MIN`; opposing overflows cancel to zero.
pub fn calculate_score_at(
    job: &Job,
    profile: &PreferenceProfile,
    now: DateTime<Utc>,
    out_details: &mut Vec<MatchDetail>,
) -> f64 {
    let mut total = 0.0;
    for category in Category::ALL {
        total += score_category(job, profile, category, out_details);
    }
    total += score_description(job, profile, out_details);
    total += score_freshness(job, profile, now, out_details);
    saturate(total)
}

fn saturate(total: f64) -> f64 {
    if total.is_nan() {
        0.0
    } else {
        total.clamp(f64::MIN, f64::MAX)
    }
}

/// Scores every job independently. Inputs are left untouched.
pub fn enrich_jobs_with_score(
    jobs: &[Job],
    profile: &PreferenceProfile,
    default_threshold: f64,
) -> Vec<ScoredJob> {
    enrich_jobs_with_score_at(jobs, profile, default_threshold, Utc::now())
}

pub fn enrich_jobs_with_score_at(
    jobs: &[Job],
    profile: &PreferenceProfile,
    default_threshold: f64,
    now: DateTime<Utc>,
) -> Vec<ScoredJob> {
    let threshold = profile.effective_threshold(default_threshold);

    jobs.iter()
        .map(|job| {
            let mut match_details = Vec::new();
            let score = calculate_score_at(job, profile, now, &mut match_details);
            let is_match = score >= threshold;
            debug!(
                job_id = %job.id_label(),
                score,
                threshold,
                is_match,
                "scored job"
            );

            let mut fields = job.clone().into_fields();
            for key in SCORE_KEYS {
                fields.shift_remove(key);
            }

            ScoredJob {
                job: Job::new(fields),
                score,
                is_match,
                match_details,
            }
        })
        .collect()
}
