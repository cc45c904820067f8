use std::path::PathBuf;

use anyhow::{Context, Result};

/// File extensions accepted for upload. Fixed for the process lifetime.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

/// Application configuration loaded from environment variables.
/// Every knob has a default, so the service starts with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Working directory where uploaded files are written (and later reaped).
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Entity tagger selection: "heuristic" or "off".
    pub entity_tagger: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite:resume_analysis.db"),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (16 * 1024 * 1024).to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            entity_tagger: env_or("ENTITY_TAGGER", "heuristic"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Returns true when `filename` carries one of the allowed extensions,
/// compared case-insensitively.
pub fn allowed_file(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
