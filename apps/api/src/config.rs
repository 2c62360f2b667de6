use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every field has a default, so a bare checkout starts with `cargo run`.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile_path: PathBuf,
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            profile_path: env_or("PROFILE_PATH", "profile/profile.json").into(),
            database_url: env_or("DATABASE_URL", "sqlite://job_agent.db?mode=rwc"),
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
