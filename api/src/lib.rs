//! # Backend API Client
//!
//! Reqwest-based implementation of the [`Backend`] contract against the
//! Coreader backend's JSON-over-HTTP endpoints.
//!
//! Transport discipline (shared by every call):
//! - no retries, no client-side caching
//! - a non-success response surfaces its body text verbatim in
//!   [`ApiError::Api`] so the caller can show it unchanged

use std::time::Duration;

use async_trait::async_trait;
use config::ClientConfig;
use cr_core::traits::Backend;
use cr_core::types::{
    AssistantMessage, ChatRequest, ExportOutcome, ExportPayload, ExportPreview, ProgressResponse,
    ProviderInfo, Settings, ZoteroQuery, ZoteroResults,
};
use errors::ApiError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// HTTP client bound to one backend base URL.
pub struct BackendApi {
    client: reqwest::Client,
    base_url: String,
}

impl BackendApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize(base_url.into()),
        }
    }

    /// Build a client from configuration, honoring the request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: normalize(config.base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        decode(path, response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(path, response).await
    }
}

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

async fn decode<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(path, status = status.as_u16(), "backend returned failure");
        Err(ApiError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Backend for BackendApi {
    async fn get_settings(&self) -> Result<Settings, ApiError> {
        self.get_json("/settings").await
    }

    async fn put_settings(&self, settings: &Settings) -> Result<Settings, ApiError> {
        self.post_json("/settings", settings).await
    }

    async fn provider_info(&self) -> Result<ProviderInfo, ApiError> {
        self.get_json("/settings/info").await
    }

    async fn progress(&self) -> Result<ProgressResponse, ApiError> {
        self.get_json("/progress").await
    }

    async fn chat(&self, message: &str) -> Result<AssistantMessage, ApiError> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        self.post_json("/chat", &request).await
    }

    async fn export_preview(&self, payload: &ExportPayload) -> Result<ExportPreview, ApiError> {
        self.post_json("/export/preview", payload).await
    }

    async fn export_commit(&self, payload: &ExportPayload) -> Result<ExportOutcome, ApiError> {
        self.post_json("/export", payload).await
    }

    async fn zotero_search(&self, query: &str) -> Result<ZoteroResults, ApiError> {
        let request = ZoteroQuery {
            q: query.to_string(),
        };
        self.post_json("/zotero/search", &request).await
    }
}
