//! Client configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default API base URL (can be overridden at compile time via the
/// SPRINGBOARD_API_URL env var).
pub const DEFAULT_API_BASE_URL: &str = match option_env!("SPRINGBOARD_API_URL") {
    Some(url) => url,
    None => "https://api.springboard.fi",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend origin, without the `/api/v1` prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Where to persist the session. `None` keeps it in memory only
    /// (signed out on restart).
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            session_file: None,
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from
    /// environment. The API base URL is compile-time only; at runtime
    /// only the log level can change (SPRINGBOARD_LOG_LEVEL).
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    fn load_from_env(&mut self) {
        if let Ok(log_level) = std::env::var("SPRINGBOARD_LOG_LEVEL") {
            self.log_level = log_level;
        }
    }
}
