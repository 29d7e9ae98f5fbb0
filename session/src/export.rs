//! Export transaction.
//!
//! Two-phase preview-then-confirm protocol for persisting the most recent
//! assistant answer as a note. The payload is snapshotted when the
//! transaction starts; a chat exchange completing mid-transaction never
//! changes what gets exported, and preview edits on the caller's side are
//! display-only (confirm resends the snapshotted payload).
//!
//! Every transaction carries a generation token. A preview response whose
//! token no longer matches the live transaction — the user cancelled, or a
//! newer transaction started — is discarded instead of resurfacing the
//! preview. That makes the cancel race testable without an event loop.

use std::sync::Arc;

use cr_core::traits::Backend;
use cr_core::types::{BookMeta, ExportOutcome, ExportPayload, ExportPreview};
use errors::ExportError;
use uuid::Uuid;

use crate::state::SessionState;

/// Observable phase of the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    PreviewRequested,
    PreviewShown,
    ConfirmRequested,
    Committed,
    Failed,
    Cancelled,
}

/// A started transaction waiting for its preview response.
#[derive(Debug, Clone)]
pub struct PendingPreview {
    pub token: Uuid,
    pub payload: ExportPayload,
}

struct ActiveExport {
    token: Uuid,
    payload: ExportPayload,
    preview: Option<ExportPreview>,
}

pub struct ExportTransaction {
    backend: Arc<dyn Backend>,
    note_title: String,
    phase: ExportPhase,
    active: Option<ActiveExport>,
}

impl ExportTransaction {
    pub fn new(backend: Arc<dyn Backend>, note_title: impl Into<String>) -> Self {
        Self {
            backend,
            note_title: note_title.into(),
            phase: ExportPhase::Idle,
            active: None,
        }
    }

    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    /// The preview currently shown, if any.
    pub fn preview(&self) -> Option<&ExportPreview> {
        self.active.as_ref().and_then(|a| a.preview.as_ref())
    }

    /// The payload the transaction will send on confirm.
    pub fn payload(&self) -> Option<&ExportPayload> {
        self.active.as_ref().map(|a| &a.payload)
    }

    /// Snapshot the session's last answer and selected book into a new
    /// transaction. Replaces any open transaction, invalidating its token.
    ///
    /// Reports `NothingToExport` without issuing a request when no
    /// assistant answer exists.
    pub fn start(&mut self, session: &SessionState) -> Result<PendingPreview, ExportError> {
        let Some(answer) = session.last_answer.as_ref() else {
            return Err(ExportError::NothingToExport);
        };
        let payload = ExportPayload {
            reply: answer.reply.clone(),
            citations: answer.citations.clone(),
            title: self.note_title.clone(),
            book: session.selected_book.clone(),
        };
        let token = Uuid::new_v4();
        self.active = Some(ActiveExport {
            token,
            payload: payload.clone(),
            preview: None,
        });
        self.phase = ExportPhase::PreviewRequested;
        tracing::debug!(%token, "export transaction started");
        Ok(PendingPreview { token, payload })
    }

    /// Apply a preview response for `token`.
    ///
    /// Returns false when the response is stale — the transaction it
    /// belongs to was cancelled or superseded — in which case nothing
    /// changes and the preview must not be shown.
    pub fn apply_preview(&mut self, token: Uuid, preview: ExportPreview) -> bool {
        match self.active.as_mut() {
            Some(active) if active.token == token => {
                active.preview = Some(preview);
                self.phase = ExportPhase::PreviewShown;
                true
            }
            _ => {
                tracing::debug!(%token, "discarding stale preview response");
                false
            }
        }
    }

    /// Start a transaction and run its preview exchange.
    pub async fn begin(&mut self, session: &SessionState) -> Result<ExportPreview, ExportError> {
        let pending = self.start(session)?;
        let preview = match self.backend.export_preview(&pending.payload).await {
            Ok(preview) => preview,
            Err(e) => {
                self.close(ExportPhase::Failed);
                return Err(e.into());
            }
        };
        if self.apply_preview(pending.token, preview.clone()) {
            Ok(preview)
        } else {
            Err(ExportError::AlreadyClosed)
        }
    }

    /// Re-issue the preview with a different bibliographic record.
    ///
    /// Allowed only while a preview is shown; the phase does not change and
    /// the snapshot's reply/citations are reused untouched, so a later
    /// confirm carries exactly the previewed book.
    pub async fn select_book(
        &mut self,
        book: Option<BookMeta>,
    ) -> Result<ExportPreview, ExportError> {
        if self.phase != ExportPhase::PreviewShown {
            return Err(ExportError::NotPreviewed);
        }
        let (token, payload) = {
            let active = self.active.as_mut().ok_or(ExportError::NotPreviewed)?;
            active.payload.book = book;
            (active.token, active.payload.clone())
        };
        let preview = match self.backend.export_preview(&payload).await {
            Ok(preview) => preview,
            Err(e) => {
                self.close(ExportPhase::Failed);
                return Err(e.into());
            }
        };
        self.apply_preview(token, preview.clone());
        Ok(preview)
    }

    /// Commit the previewed payload.
    ///
    /// The outcome is terminal either way: `status == "ok"` commits,
    /// anything else fails with the backend's message; the transaction
    /// closes in both cases.
    pub async fn confirm(&mut self) -> Result<ExportOutcome, ExportError> {
        if self.phase != ExportPhase::PreviewShown {
            return Err(ExportError::NotPreviewed);
        }
        let payload = self
            .active
            .as_ref()
            .map(|a| a.payload.clone())
            .ok_or(ExportError::NotPreviewed)?;
        self.phase = ExportPhase::ConfirmRequested;
        let outcome = match self.backend.export_commit(&payload).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.close(ExportPhase::Failed);
                return Err(e.into());
            }
        };
        let terminal = if outcome.is_ok() {
            ExportPhase::Committed
        } else {
            ExportPhase::Failed
        };
        self.close(terminal);
        Ok(outcome)
    }

    /// Dismiss the transaction without committing. Issues no request; the
    /// token is invalidated so an in-flight preview response is discarded.
    pub fn cancel(&mut self) {
        if self.active.is_some() || self.phase == ExportPhase::PreviewRequested {
            self.close(ExportPhase::Cancelled);
        }
    }

    fn close(&mut self, terminal: ExportPhase) {
        self.active = None;
        self.phase = terminal;
    }
}
