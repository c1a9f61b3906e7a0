//! The individual scoring passes. Each returns its subtotal and appends evidence.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::preferences::{weight_or_zero, PreferenceProfile};
use crate::scoring::category::Category;
use crate::scoring::document::Job;
use crate::scoring::text::{normalize, strip_html, word_set};
use crate::scoring::{FreshnessMatch, MatchDetail, TermMatch};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Matches every term configured for `category` against the category's job fields.
///
/// A term hits a field value when it equals one of the value's word tokens, or when it
/// occurs anywhere in the lower-cased value (which is how multi-word terms such as
/// "ms project" match). Hits are additive: every (value, term) pair that hits adds the
/// term's weight once.
pub fn score_category(
    job: &Job,
    profile: &PreferenceProfile,
    category: Category,
    details: &mut Vec<MatchDetail>,
) -> f64 {
    let Some(terms) = profile.terms(category) else {
        return 0.0;
    };

    let prepared: Vec<(&str, String, f64)> = terms
        .iter()
        .map(|(term, weight)| (term.as_str(), normalize(term), weight_or_zero(weight)))
        .collect();

    let mut subtotal = 0.0;
    let mut tokens_cache: HashMap<String, HashSet<String>> = HashMap::new();

    for &field in category.field_paths() {
        for raw in job.extract(field) {
            let base = normalize(raw);
            let words = tokens_cache
                .entry(base.clone())
                .or_insert_with(|| word_set(&base));

            for (term, term_norm, weight) in &prepared {
                if words.contains(term_norm) || base.contains(term_norm.as_str()) {
                    subtotal += weight;
                    details.push(MatchDetail::Term(TermMatch {
                        category: category.as_str(),
                        field,
                        value: raw.to_string(),
                        pref_key: (*term).to_string(),
                        weight: *weight,
                    }));
                }
            }
        }
    }

    subtotal
}

/// Plain substring pass of `skills` terms over the tag-stripped description.
///
/// Runs in addition to the `skills` category pass, so a skill named in the
/// description is counted by both.
pub fn score_description(
    job: &Job,
    profile: &PreferenceProfile,
    details: &mut Vec<MatchDetail>,
) -> f64 {
    let Some(description) = job.str_field("description") else {
        return 0.0;
    };
    let Some(skills) = profile.terms(Category::Skills).filter(|s| !s.is_empty()) else {
        return 0.0;
    };

    let text = normalize(&strip_html(description));
    let mut subtotal = 0.0;

    for (skill, weight) in skills {
        if text.contains(normalize(skill).as_str()) {
            let weight = weight_or_zero(weight);
            subtotal += weight;
            details.push(MatchDetail::Term(TermMatch {
                category: "description",
                field: "description",
                value: description.to_string(),
                pref_key: skill.clone(),
                weight,
            }));
        }
    }

    subtotal
}

/// All-or-nothing bonus for postings no older than `freshness.max_age_days`.
pub fn score_freshness(
    job: &Job,
    profile: &PreferenceProfile,
    now: DateTime<Utc>,
    details: &mut Vec<MatchDetail>,
) -> f64 {
    let Some(freshness) = profile.freshness() else {
        return 0.0;
    };
    let Some(posted_at) = posted_at(job) else {
        return 0.0;
    };

    let age_days = (now - posted_at).num_milliseconds() as f64 / MS_PER_DAY;
    if age_days > freshness.max_age_days {
        return 0.0;
    }

    details.push(MatchDetail::Freshness(FreshnessMatch {
        category: "freshness",
        age_days: (age_days * 100.0).round() / 100.0,
        weight: freshness.weight,
    }));
    freshness.weight
}

/// `published_at` when it parses, otherwise `created_at`.
fn posted_at(job: &Job) -> Option<DateTime<Utc>> {
    job.str_field("published_at")
        .and_then(parse_timestamp)
        .or_else(|| job.str_field("created_at").and_then(parse_timestamp))
}

/// Accepts RFC 3339, zone-less date-times (read as UTC) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
