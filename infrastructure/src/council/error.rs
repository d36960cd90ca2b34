//! Error types for the council HTTP adapters

use thiserror::Error;

/// Result type alias for adapter construction
pub type Result<T> = std::result::Result<T, CouncilHttpError>;

/// Errors that can occur while setting up a council server client
#[derive(Error, Debug)]
pub enum CouncilHttpError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("Invalid council server URL: {0:?} (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

/// Validate and normalize a server base URL (no trailing slash)
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(CouncilHttpError::InvalidBaseUrl(raw.to_string())),
    }
}
