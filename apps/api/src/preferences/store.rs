use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::preferences::{PreferenceError, PreferenceProfile};

/// The active profile plus when it last changed.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceSnapshot {
    pub preferences: PreferenceProfile,
    pub updated_at: DateTime<Utc>,
}

/// In-memory holder for the active preference profile.
///
/// Scoring takes a cloned snapshot and never holds the lock while scoring. Nothing is
/// written to disk; a restart returns to the seed profile.
#[derive(Clone)]
pub struct PreferenceStore {
    inner: Arc<RwLock<PreferenceSnapshot>>,
}

impl PreferenceStore {
    pub fn new(profile: PreferenceProfile) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PreferenceSnapshot {
                preferences: profile,
                updated_at: Utc::now(),
            })),
        }
    }

    pub async fn snapshot(&self) -> PreferenceSnapshot {
        self.inner.read().await.clone()
    }

    pub async fn profile(&self) -> PreferenceProfile {
        self.inner.read().await.preferences.clone()
    }

    /// Applies `edit` under the write lock. The profile is left untouched when the
    /// edit fails.
    pub async fn update<T, F>(&self, edit: F) -> Result<(T, PreferenceSnapshot), PreferenceError>
    where
        F: FnOnce(&mut PreferenceProfile) -> Result<T, PreferenceError>,
    {
        let mut guard = self.inner.write().await;
        let mut draft = guard.preferences.clone();
        let outcome = edit(&mut draft)?;
        guard.preferences = draft;
        guard.updated_at = Utc::now();
        Ok((outcome, guard.clone()))
    }
}

/// Reads a seed profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<PreferenceProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences file '{}'", path.display()))?;
    let profile: PreferenceProfile = serde_json::from_str(&raw)
        .with_context(|| format!("Preferences file '{}' is not a JSON object", path.display()))?;
    info!("Loaded preference profile from {}", path.display());
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::category::Category;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_update_commits_successful_edit() {
        let store = PreferenceStore::new(PreferenceProfile::default());
        let before = store.snapshot().await.updated_at;

        let (weight, snapshot) = store
            .update(|p| p.set_weight(Category::Skills, "wbs", &json!(2)))
            .await
            .unwrap();

        assert_eq!(weight, 2.0);
        assert!(snapshot.updated_at >= before);
        assert!(store.profile().await.terms(Category::Skills).is_some());
    }

    #[tokio::test]
    async fn test_update_discards_failed_edit() {
        let store = PreferenceStore::new(PreferenceProfile::default());

        let result = store
            .update(|p| {
                p.set_weight(Category::Skills, "wbs", &json!(2))?;
                p.set_score_threshold(&json!("not a number"))
            })
            .await;

        assert_eq!(result.unwrap_err(), PreferenceError::InvalidThreshold);
        assert_eq!(store.profile().await, PreferenceProfile::default());
    }

    #[test]
    fn test_load_profile_reads_json_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"roles": {{"planning engineer": 5}}, "score_threshold": 6}}"#).unwrap();

        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.score_threshold(), Some(6.0));
        assert!(profile.terms(Category::Roles).is_some());
    }

    #[test]
    fn test_load_profile_rejects_non_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        let err = load_profile(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn test_load_profile_missing_file() {
        let err = load_profile(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
