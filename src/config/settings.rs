use serde::Deserialize;

use crate::utils::constants::{DEFAULT_CREDENTIAL_PATH, DEFAULT_HTTP_TIMEOUT_SECS};

/// ================================
/// Global settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    /// Where the session token survives between runs
    #[serde(default = "default_credential_path")]
    pub credential_path: String,
    /// Applied to each network call
    /// invariant: > 0
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,
    pub logging: Option<LoggingConfig>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            credential_path: default_credential_path(),
            http_timeout_seconds: default_http_timeout_seconds(),
            logging: None,
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_credential_path() -> String {
    DEFAULT_CREDENTIAL_PATH.to_string()
}

fn default_http_timeout_seconds() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}
