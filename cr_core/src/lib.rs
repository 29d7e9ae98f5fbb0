//! # Coreader Client Core
//!
//! Shared types and traits for the Coreader reading-companion client.
//!
//! This crate provides:
//! - Wire-format types for the backend contract (settings, progress
//!   sections, chat answers, export payloads)
//! - The `Backend` trait, the single seam between the session cores and
//!   the HTTP client
//! - The pure settings merge used by every read-modify-write cycle

pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use traits::Backend;
pub use types::{
    AssistantMessage, BookMeta, Citation, ExportOutcome, ExportPayload, ExportPreview,
    ProgressResponse, Section, SectionStatus, Settings, SettingsPatch,
};
