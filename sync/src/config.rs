//! Configuration management for the CLI binaries.

use std::env;
use std::path::PathBuf;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON store file
    pub store_path: PathBuf,
    /// Directory where captured thumbnails are written
    pub thumbnail_dir: PathBuf,
    /// Base URL of the batch screenshot API
    pub screenshot_api_url: String,
    /// Base URL of the Microlink API for single captures
    pub microlink_api_url: String,
    /// Delay between capture requests, to avoid rate limiting
    pub capture_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// everything.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_path = env::var("PRODLAB_STORE_PATH")
            .unwrap_or_else(|_| "data/store.json".to_string())
            .into();

        let thumbnail_dir = env::var("PRODLAB_THUMBNAIL_DIR")
            .unwrap_or_else(|_| "public/thumbnails".to_string())
            .into();

        let screenshot_api_url = env::var("PRODLAB_SCREENSHOT_API_URL")
            .unwrap_or_else(|_| "https://api.screenshotone.com/take".to_string());

        let microlink_api_url = env::var("PRODLAB_MICROLINK_API_URL")
            .unwrap_or_else(|_| "https://api.microlink.io/".to_string());

        let capture_delay_ms = env::var("PRODLAB_CAPTURE_DELAY_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidCaptureDelay)?;

        Ok(Self {
            store_path,
            thumbnail_dir,
            screenshot_api_url,
            microlink_api_url,
            capture_delay_ms,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PRODLAB_CAPTURE_DELAY_MS value")]
    InvalidCaptureDelay,
}
