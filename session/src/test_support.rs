//! In-memory backend double for session tests.
//!
//! Holds a settings record and a section list like the real backend does,
//! so `progress` derives `current_seq` from the stored boundary, and
//! records the exact JSON sent to the export endpoints so tests can assert
//! byte-identical preview/confirm payloads.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use cr_core::traits::Backend;
use cr_core::types::{
    AssistantMessage, ExportOutcome, ExportPayload, ExportPreview, ProgressResponse, ProviderInfo,
    Section, Settings, ZoteroResults,
};
use errors::ApiError;

pub struct MockBackend {
    settings: Mutex<Settings>,
    sections: Mutex<Vec<Section>>,
    preview_response: Mutex<ExportPreview>,
    outcome: Mutex<ExportOutcome>,
    books: Mutex<ZoteroResults>,
    fail_put: Mutex<Option<String>>,
    fail_preview: Mutex<Option<String>>,
    fail_commit: Mutex<Option<String>>,
    put_count: AtomicUsize,
    progress_count: AtomicUsize,
    preview_payloads: Mutex<Vec<String>>,
    commit_payloads: Mutex<Vec<String>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            settings: Mutex::new(Settings::default()),
            sections: Mutex::new(Vec::new()),
            preview_response: Mutex::new(ExportPreview {
                content: "# note".to_string(),
                suggested_path: "notes/2024-x.md".to_string(),
            }),
            outcome: Mutex::new(ExportOutcome {
                status: "ok".to_string(),
                path: Some("notes/2024-x.md".to_string()),
                message: None,
            }),
            books: Mutex::new(ZoteroResults { items: Vec::new() }),
            fail_put: Mutex::new(None),
            fail_preview: Mutex::new(None),
            fail_commit: Mutex::new(None),
            put_count: AtomicUsize::new(0),
            progress_count: AtomicUsize::new(0),
            preview_payloads: Mutex::new(Vec::new()),
            commit_payloads: Mutex::new(Vec::new()),
        }
    }
}

fn backend_error(message: &str) -> ApiError {
    ApiError::Api {
        status: 500,
        body: message.to_string(),
    }
}

impl MockBackend {
    pub fn set_settings(&self, settings: Settings) {
        *self.settings.lock().unwrap() = settings;
    }

    pub fn current_settings(&self) -> Settings {
        self.settings.lock().unwrap().clone()
    }

    pub fn set_sections(&self, sections: Vec<Section>) {
        *self.sections.lock().unwrap() = sections;
    }

    pub fn set_outcome(&self, outcome: ExportOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn fail_put(&self, message: &str) {
        *self.fail_put.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_preview(&self, message: &str) {
        *self.fail_preview.lock().unwrap() = Some(message.to_string());
    }

    #[allow(dead_code)]
    pub fn fail_commit(&self, message: &str) {
        *self.fail_commit.lock().unwrap() = Some(message.to_string());
    }

    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }

    pub fn progress_count(&self) -> usize {
        self.progress_count.load(Ordering::SeqCst)
    }

    pub fn preview_count(&self) -> usize {
        self.preview_payloads.lock().unwrap().len()
    }

    pub fn commit_count(&self) -> usize {
        self.commit_payloads.lock().unwrap().len()
    }

    /// JSON bodies sent to `/export/preview`, in call order.
    pub fn preview_payloads(&self) -> Vec<String> {
        self.preview_payloads.lock().unwrap().clone()
    }

    /// JSON bodies sent to `/export`, in call order.
    pub fn commit_payloads(&self) -> Vec<String> {
        self.commit_payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get_settings(&self) -> Result<Settings, ApiError> {
        Ok(self.current_settings())
    }

    async fn put_settings(&self, settings: &Settings) -> Result<Settings, ApiError> {
        if let Some(message) = self.fail_put.lock().unwrap().as_ref() {
            return Err(backend_error(message));
        }
        *self.settings.lock().unwrap() = settings.clone();
        self.put_count.fetch_add(1, Ordering::SeqCst);
        Ok(settings.clone())
    }

    async fn provider_info(&self) -> Result<ProviderInfo, ApiError> {
        Ok(ProviderInfo {
            openai_configured: true,
            zotero_configured: true,
        })
    }

    async fn progress(&self) -> Result<ProgressResponse, ApiError> {
        self.progress_count.fetch_add(1, Ordering::SeqCst);
        Ok(ProgressResponse {
            sections: self.sections.lock().unwrap().clone(),
            current_seq: self.current_settings().read_boundary_seq,
        })
    }

    async fn chat(&self, message: &str) -> Result<AssistantMessage, ApiError> {
        Ok(AssistantMessage {
            reply: format!("echo: {message}"),
            citations: vec![],
        })
    }

    async fn export_preview(&self, payload: &ExportPayload) -> Result<ExportPreview, ApiError> {
        if let Some(message) = self.fail_preview.lock().unwrap().as_ref() {
            return Err(backend_error(message));
        }
        let body = serde_json::to_string(payload)?;
        self.preview_payloads.lock().unwrap().push(body);
        Ok(self.preview_response.lock().unwrap().clone())
    }

    async fn export_commit(&self, payload: &ExportPayload) -> Result<ExportOutcome, ApiError> {
        if let Some(message) = self.fail_commit.lock().unwrap().as_ref() {
            return Err(backend_error(message));
        }
        let body = serde_json::to_string(payload)?;
        self.commit_payloads.lock().unwrap().push(body);
        Ok(self.outcome.lock().unwrap().clone())
    }

    async fn zotero_search(&self, _query: &str) -> Result<ZoteroResults, ApiError> {
        Ok(self.books.lock().unwrap().clone())
    }
}
