//! Weighted preference profiles.
//!
//! A profile is kept as the raw JSON document the preference editor produced:
//!
//! ```json
//! {
//!   "roles": { "planning engineer": 5, "engineer": 3 },
//!   "skills": { "primavera": 4, "ms project": 3, "wbs": 2 },
//!   "locations": { "addis ababa": 5 },
//!   "freshness": { "max_age_days": 7, "weight": 2 },
//!   "score_threshold": 10
//! }
//! ```
//!
//! Readers are lenient: a category that is not an object is treated as unset, and a
//! weight that is not numeric counts as zero.

pub mod editing;
pub mod handlers;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scoring::category::Category;

pub use editing::{category_aliases, resolve_category, PreferenceError};
pub use store::{load_profile, PreferenceSnapshot, PreferenceStore};

/// Recency bonus settings read from `profile.freshness`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Freshness {
    pub max_age_days: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceProfile(Map<String, Value>);

impl PreferenceProfile {
    /// Term → weight mapping for `category`, if one is configured.
    pub fn terms(&self, category: Category) -> Option<&Map<String, Value>> {
        self.0.get(category.as_str()).and_then(Value::as_object)
    }

    /// Freshness settings. Both values must be numeric and non-zero to be active.
    pub fn freshness(&self) -> Option<Freshness> {
        let raw = self.0.get("freshness")?.as_object()?;
        let max_age_days = raw.get("max_age_days").and_then(parse_number)?;
        let weight = raw.get("weight").and_then(parse_number)?;
        if max_age_days == 0.0 || weight == 0.0 {
            return None;
        }
        Some(Freshness {
            max_age_days,
            weight,
        })
    }

    pub fn score_threshold(&self) -> Option<f64> {
        self.0.get("score_threshold").and_then(parse_number)
    }

    /// Profile override if present and numeric, otherwise `default`.
    pub fn effective_threshold(&self, default: f64) -> f64 {
        self.score_threshold().unwrap_or(default)
    }

    pub(crate) fn document_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }
}

/// Reads a finite number from a JSON number or a numeric string.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerces a preference weight to a number, falling back to zero.
///
/// This is deliberate leniency: weights are validated when they are edited, and a
/// profile that still carries garbage must score, not fail. Booleans count as 1 and 0.
pub fn weight_or_zero(value: &Value) -> f64 {
    match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        other => parse_number(other).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: Value) -> PreferenceProfile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_weight_or_zero_coercions() {
        assert_eq!(weight_or_zero(&json!(3)), 3.0);
        assert_eq!(weight_or_zero(&json!(-1.5)), -1.5);
        assert_eq!(weight_or_zero(&json!("2.5")), 2.5);
        assert_eq!(weight_or_zero(&json!(" 4 ")), 4.0);
        assert_eq!(weight_or_zero(&json!("heavy")), 0.0);
        assert_eq!(weight_or_zero(&json!("")), 0.0);
        assert_eq!(weight_or_zero(&json!(null)), 0.0);
        assert_eq!(weight_or_zero(&json!(true)), 1.0);
        assert_eq!(weight_or_zero(&json!(false)), 0.0);
        assert_eq!(weight_or_zero(&json!([5])), 0.0);
        assert_eq!(weight_or_zero(&json!({ "w": 5 })), 0.0);
        assert_eq!(weight_or_zero(&json!("NaN")), 0.0);
        assert_eq!(weight_or_zero(&json!("inf")), 0.0);
    }

    #[test]
    fn test_terms_ignores_non_object_categories() {
        let p = profile(json!({
            "roles": { "engineer": 3 },
            "skills": ["react", "graphql"],
            "locations": "berlin"
        }));
        assert!(p.terms(Category::Roles).is_some());
        assert!(p.terms(Category::Skills).is_none());
        assert!(p.terms(Category::Locations).is_none());
        assert!(p.terms(Category::Companies).is_none());
    }

    #[test]
    fn test_terms_preserve_insertion_order() {
        let p = profile(json!({ "skills": { "zeta": 1, "alpha": 2, "mid": 3 } }));
        let keys: Vec<&str> = p
            .terms(Category::Skills)
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_effective_threshold_prefers_numeric_override() {
        assert_eq!(profile(json!({ "score_threshold": 12 })).effective_threshold(8.0), 12.0);
        assert_eq!(profile(json!({ "score_threshold": "5" })).effective_threshold(8.0), 5.0);
        assert_eq!(profile(json!({ "score_threshold": "high" })).effective_threshold(8.0), 8.0);
        assert_eq!(profile(json!({ "score_threshold": null })).effective_threshold(8.0), 8.0);
        assert_eq!(profile(json!({})).effective_threshold(8.0), 8.0);
    }

    #[test]
    fn test_freshness_requires_both_values() {
        assert_eq!(
            profile(json!({ "freshness": { "max_age_days": 7, "weight": 2 } })).freshness(),
            Some(Freshness {
                max_age_days: 7.0,
                weight: 2.0
            })
        );
        assert_eq!(profile(json!({ "freshness": { "max_age_days": 7 } })).freshness(), None);
        assert_eq!(
            profile(json!({ "freshness": { "max_age_days": 0, "weight": 2 } })).freshness(),
            None
        );
        assert_eq!(profile(json!({ "freshness": 7 })).freshness(), None);
    }
}
