//! Environment-driven configuration.
//!
//! Both binaries read their settings from the environment; there is no
//! command-line surface. The sync endpoint and key are optional: when either
//! is missing the application runs fully local.

use std::env;
use std::path::PathBuf;

use tracing::info;

/// Default dataset artifact path, shared by both binaries.
const DEFAULT_DATASET: &str = "data/projects.json";

/// Settings for the swipe application.
pub struct AppConfig {
    /// Dataset artifact to load at startup.
    pub dataset_path: PathBuf,
    /// Remote backend root URL; sync is disabled when unset.
    pub sync_url: Option<String>,
    /// Public API key for the remote backend.
    pub sync_key: Option<String>,
    /// User access token obtained from the redirect sign-in flow.
    pub access_token: Option<String>,
    /// Log file path; logging is off when unset (raw-mode terminals and
    /// stderr logs do not mix).
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            dataset_path: PathBuf::from(var_or("HACKSWIPE_DATASET", DEFAULT_DATASET)),
            sync_url: var("HACKSWIPE_SYNC_URL"),
            sync_key: var("HACKSWIPE_SYNC_KEY"),
            access_token: var("HACKSWIPE_ACCESS_TOKEN"),
            log_path: var("HACKSWIPE_LOG").map(PathBuf::from),
        }
    }
}

/// Settings for the dataset converter.
pub struct ConvertConfig {
    pub raw_path: PathBuf,
    pub dataset_path: PathBuf,
}

impl ConvertConfig {
    pub fn from_env() -> Self {
        Self {
            raw_path: PathBuf::from(var_or("HACKSWIPE_RAW", "devpost_winners.json")),
            dataset_path: PathBuf::from(var_or("HACKSWIPE_DATASET", DEFAULT_DATASET)),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
