use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Default match threshold when a profile carries no `score_threshold`.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 8.0;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub score_threshold: f64,
    /// JSON file seeding the in-memory preference profile.
    pub preferences_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            score_threshold: match lookup("SCORE_THRESHOLD") {
                Some(raw) => parse_threshold(&raw)?,
                None => DEFAULT_SCORE_THRESHOLD,
            },
            preferences_path: lookup("PREFERENCES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_threshold(raw: &str) -> Result<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("SCORE_THRESHOLD must be a number, got '{raw}'"))?;
    if !value.is_finite() {
        bail!("SCORE_THRESHOLD must be finite, got '{raw}'");
    }
    Ok(value)
}
