//! # Coreader Errors
//!
//! Error taxonomy for the Coreader client core.
//!
//! - Uses `thiserror` for structured error definitions
//! - One enum per component, matching the failure semantics of each:
//!   every failure is terminal for the triggering user action, never
//!   retried, never left half-applied
//! - Transport and decode failures carry the backend's response text
//!   verbatim so the caller can surface it unchanged

use thiserror::Error;

/// Backend transport and protocol errors, shared by every component that
/// performs a request/response exchange.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Settings synchronizer errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Backend(#[from] ApiError),

    #[error("Offline cache unavailable: {reason}")]
    Cache { reason: String },
}

/// Progress tracker errors.
///
/// An empty section list is not represented here: "no sections, reindex
/// required" is an informational view state, not a failure.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error(transparent)]
    Backend(#[from] ApiError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Invalid section list: {reason}")]
    InvalidSections { reason: String },
}

/// Export transaction errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Backend(#[from] ApiError),

    #[error("No assistant answer to export")]
    NothingToExport,

    #[error("Transaction is not showing a preview")]
    NotPreviewed,

    #[error("Transaction already closed")]
    AlreadyClosed,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {reason}")]
    Parse { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_keeps_body_verbatim() {
        let err = ApiError::Api {
            status: 500,
            body: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 500: disk full");
    }

    #[test]
    fn test_settings_error_is_transparent_over_api() {
        let err = SettingsError::Backend(ApiError::Api {
            status: 503,
            body: "unavailable".to_string(),
        });
        assert_eq!(err.to_string(), "Backend returned 503: unavailable");
    }

    #[test]
    fn test_invalid_sections_message() {
        let err = ProgressError::InvalidSections {
            reason: "sections overlap at seq 50".to_string(),
        };
        assert!(err.to_string().contains("overlap at seq 50"));
    }
}
