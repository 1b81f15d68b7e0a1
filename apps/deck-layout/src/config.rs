use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding an array of slide specs.
    pub input: PathBuf,
    pub theme: String,
    /// Extra theme files loaded on top of the built-ins.
    pub themes_dir: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            input: require_env("DECK_INPUT")?.into(),
            theme: std::env::var("DECK_THEME").unwrap_or_else(|_| "default".to_string()),
            themes_dir: optional_env("DECK_THEMES_DIR").map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
