//! Validated edits to a preference profile.
//!
//! Scoring is lenient about what it reads; this is where strictness lives. Category
//! names from clients are normalized through a synonym table, terms must be non-blank,
//! and weights and thresholds must be finite numbers.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::preferences::{parse_number, PreferenceProfile};
use crate::scoring::category::Category;

#[derive(Debug, Error, PartialEq)]
pub enum PreferenceError {
    #[error("Invalid category '{0}'")]
    InvalidCategory(String),

    #[error("Invalid key: preference terms cannot be blank")]
    InvalidTerm,

    #[error("Invalid weight (must be a number)")]
    InvalidWeight,

    #[error("Threshold must be a number")]
    InvalidThreshold,
}

const CATEGORY_SYNONYMS: &[(&str, &str)] = &[
    ("role", "roles"),
    ("skill", "skills"),
    ("sector", "sectors"),
    ("location", "locations"),
    ("company", "companies"),
    ("exp", "experience_level"),
    ("experience", "experience_level"),
    ("experience-level", "experience_level"),
    ("seniority", "experience_level"),
    ("jobtype", "job_type"),
    ("job-type", "job_type"),
    ("compensation", "compensation_type"),
    ("compensation-type", "compensation_type"),
];

/// Lower-cases a client-supplied category name and resolves known synonyms.
/// Unknown names are returned lower-cased, unchanged otherwise.
pub fn normalize_category_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    CATEGORY_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(lowered)
}

/// Synonyms that resolve to `category`.
pub fn category_aliases(category: Category) -> Vec<&'static str> {
    CATEGORY_SYNONYMS
        .iter()
        .filter(|(_, canonical)| *canonical == category.as_str())
        .map(|(alias, _)| *alias)
        .collect()
}

pub fn resolve_category(raw: &str) -> Result<Category, PreferenceError> {
    let normalized = normalize_category_name(raw);
    Category::from_name(&normalized).ok_or_else(|| PreferenceError::InvalidCategory(raw.to_string()))
}

fn validate_term(term: &str) -> Result<&str, PreferenceError> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(PreferenceError::InvalidTerm);
    }
    Ok(trimmed)
}

impl PreferenceProfile {
    /// Sets `term` to `weight` in `category`, creating the category if needed.
    /// Returns the stored weight.
    pub fn set_weight(
        &mut self,
        category: Category,
        term: &str,
        weight: &Value,
    ) -> Result<f64, PreferenceError> {
        let term = validate_term(term)?;
        let weight = parse_number(weight).ok_or(PreferenceError::InvalidWeight)?;
        let stored = serde_json::Number::from_f64(weight).ok_or(PreferenceError::InvalidWeight)?;

        let slot = self
            .document_mut()
            .entry(category.as_str())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(terms) = slot {
            terms.insert(term.to_string(), Value::Number(stored));
        }
        Ok(weight)
    }

    /// Removes `term` from `category`. Returns whether anything was removed.
    pub fn remove_term(&mut self, category: Category, term: &str) -> Result<bool, PreferenceError> {
        let term = validate_term(term)?;
        let removed = self
            .document_mut()
            .get_mut(category.as_str())
            .and_then(Value::as_object_mut)
            .and_then(|terms| terms.shift_remove(term))
            .is_some();
        Ok(removed)
    }

    pub fn set_score_threshold(&mut self, value: &Value) -> Result<f64, PreferenceError> {
        let threshold = parse_number(value).ok_or(PreferenceError::InvalidThreshold)?;
        let stored =
            serde_json::Number::from_f64(threshold).ok_or(PreferenceError::InvalidThreshold)?;
        self.document_mut()
            .insert("score_threshold".to_string(), Value::Number(stored));
        Ok(threshold)
    }

    /// Drops the override so the configured default applies again.
    pub fn clear_score_threshold(&mut self) -> bool {
        self.document_mut().shift_remove("score_threshold").is_some()
    }
}
