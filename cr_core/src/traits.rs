//! Client-side seam over the backend HTTP contract.

use async_trait::async_trait;
use errors::ApiError;

use crate::types::{
    AssistantMessage, ExportOutcome, ExportPayload, ExportPreview, ProgressResponse, ProviderInfo,
    Settings, ZoteroResults,
};

/// Request/response collaborator contract of the backend.
///
/// The session cores depend on this trait only, so tests drive them with an
/// in-memory double instead of a live server. Every call is a suspension
/// point; none retries on failure.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn get_settings(&self) -> Result<Settings, ApiError>;

    /// Writes the full record; the backend echoes what it stored.
    async fn put_settings(&self, settings: &Settings) -> Result<Settings, ApiError>;

    async fn provider_info(&self) -> Result<ProviderInfo, ApiError>;

    async fn progress(&self) -> Result<ProgressResponse, ApiError>;

    async fn chat(&self, message: &str) -> Result<AssistantMessage, ApiError>;

    async fn export_preview(&self, payload: &ExportPayload) -> Result<ExportPreview, ApiError>;

    async fn export_commit(&self, payload: &ExportPayload) -> Result<ExportOutcome, ApiError>;

    async fn zotero_search(&self, query: &str) -> Result<ZoteroResults, ApiError>;
}
