//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.

use std::path::PathBuf;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "churn-risk";

/// Environment variable naming the artifact bundle
pub const ARTIFACT_PATH_ENV: &str = "CHURN_ARTIFACT_PATH";

/// File name of the artifact inside the data directory
pub const DEFAULT_ARTIFACT_FILE: &str = "churn_model.json";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Default artifact location in the platform data directory
pub fn get_default_artifact_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(DEFAULT_ARTIFACT_FILE)
}

/// Get artifact path from environment or use default
pub fn get_artifact_path() -> PathBuf {
    std::env::var(ARTIFACT_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_default_artifact_path())
}
