//! Startup configuration read from the environment.
//!
//! | Variable                | Default                 |
//! |-------------------------|-------------------------|
//! | `AGRI_DETECT_API_URL`   | `http://localhost:8000` |
//! | `AGRI_DETECT_LOG_MODE`  | `auto`                  |
//! | `AGRI_DETECT_LOG_FILE`  | `agri-detect.log`       |
//!
//! Values are read once; nothing is reloaded while the app runs.

use std::path::PathBuf;

use crate::AgriDetectError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_FILE: &str = "agri-detect.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the prediction service, without trailing slash
    pub api_url: String,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ClientConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    /// Returns `AgriDetectError::Config` if a value is malformed.
    pub fn from_env() -> Result<Self, AgriDetectError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `AgriDetectError::Config` if a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AgriDetectError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("AGRI_DETECT_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = normalize_api_url(&url)?;
        }

        if let Some(mode) = lookup("AGRI_DETECT_LOG_MODE") {
            config.log_mode = match mode.trim().to_ascii_lowercase().as_str() {
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                "auto" | "" => LogMode::Auto,
                other => {
                    return Err(AgriDetectError::Config(format!(
                        "AGRI_DETECT_LOG_MODE must be auto, file or stdout (got {other:?})"
                    )))
                }
            };
        }

        if let Some(file) = lookup("AGRI_DETECT_LOG_FILE").filter(|v| !v.is_empty()) {
            config.log_file = PathBuf::from(file);
        }

        Ok(config)
    }
}

/// Validate an http(s) base URL and strip trailing slashes.
///
/// # Errors
/// Returns `AgriDetectError::Config` for unparsable or non-http URLs.
pub fn normalize_api_url(raw: &str) -> Result<String, AgriDetectError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| AgriDetectError::Config(format!("invalid API URL {trimmed:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(AgriDetectError::Config(format!(
            "API URL must use http or https, not {other}"
        ))),
    }
}
