//! # Configuration System
//!
//! Client configuration for the Coreader session core.
//!
//! This crate provides:
//! - The `ClientConfig` structure (backend URL, cache dir, timeouts, note title)
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML)
//! - Configuration precedence (env > file > defaults)
//! - Configuration validation with field context

use std::path::{Path, PathBuf};

use errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Coreader backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Directory for client-local state (the offline override cache).
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Title stamped on exported notes.
    #[serde(default = "default_note_title")]
    pub note_title: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".coreader/cache")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_note_title() -> String {
    "Coreader".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cache_dir: default_cache_dir(),
            timeout_secs: default_timeout_secs(),
            note_title: default_note_title(),
        }
    }
}

impl ClientConfig {
    /// Load configuration with precedence: env > file > defaults.
    ///
    /// A missing file is not an error; env vars always win over file values.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) if path.exists() => Self::load_from_file(path)?,
            _ => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Overlay `COREADER_*` environment variables.
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("COREADER_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(dir) = std::env::var("COREADER_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }
        if let Ok(timeout) = std::env::var("COREADER_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.timeout_secs = secs;
            } else {
                tracing::warn!(value = %timeout, "ignoring non-numeric COREADER_TIMEOUT_SECS");
            }
        }
        if let Ok(title) = std::env::var("COREADER_NOTE_TITLE") {
            self.note_title = title;
        }
    }

    /// Validate the assembled configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "base_url".to_string(),
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
