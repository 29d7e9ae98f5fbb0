//! Progress tracker.
//!
//! Fetches the section list and current read boundary, classifies every
//! section, and provides the "mark section as read" compound operation.

use std::sync::Arc;

use cr_core::traits::Backend;
use cr_core::types::{Section, SectionStatus};
use errors::ProgressError;
use serde::{Deserialize, Serialize};

use crate::settings::SettingsSynchronizer;

/// Classify one section against the read boundary.
///
/// Pure and re-derivable from `(section, boundary)` alone:
/// - `Current` iff `min_seq <= boundary <= max_seq`
/// - otherwise `Done` iff `max_seq <= boundary`
/// - otherwise `Pending` (including an unset boundary)
pub fn classify(section: &Section, boundary: Option<u64>) -> SectionStatus {
    match boundary {
        Some(b) if section.min_seq <= b && b <= section.max_seq => SectionStatus::Current,
        Some(b) if section.max_seq <= b => SectionStatus::Done,
        _ => SectionStatus::Pending,
    }
}

/// One classified section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRow {
    pub section: Section,
    pub status: SectionStatus,
}

/// Result of a progress refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressView {
    /// No sections exist yet; the document needs (re)indexing. This is an
    /// informational state, not an error.
    ReindexRequired,
    Sections {
        rows: Vec<SectionRow>,
        current_seq: Option<u64>,
    },
}

/// Reject malformed section lists with a defined error instead of silently
/// producing inconsistent statuses.
fn validate_sections(sections: &[Section]) -> Result<(), ProgressError> {
    for section in sections {
        if section.min_seq > section.max_seq {
            return Err(ProgressError::InvalidSections {
                reason: format!(
                    "section '{}' has min_seq {} > max_seq {}",
                    section.title, section.min_seq, section.max_seq
                ),
            });
        }
    }
    for pair in sections.windows(2) {
        if pair[1].min_seq <= pair[0].max_seq {
            return Err(ProgressError::InvalidSections {
                reason: format!(
                    "sections '{}' and '{}' overlap or are unsorted at seq {}",
                    pair[0].title, pair[1].title, pair[1].min_seq
                ),
            });
        }
    }
    Ok(())
}

pub struct ProgressTracker {
    backend: Arc<dyn Backend>,
    settings: Arc<SettingsSynchronizer>,
}

impl ProgressTracker {
    pub fn new(backend: Arc<dyn Backend>, settings: Arc<SettingsSynchronizer>) -> Self {
        Self { backend, settings }
    }

    /// Single fetch of `(sections, current_seq)` plus classification.
    pub async fn refresh(&self) -> Result<ProgressView, ProgressError> {
        let response = self.backend.progress().await?;
        if response.sections.is_empty() {
            return Ok(ProgressView::ReindexRequired);
        }
        validate_sections(&response.sections)?;
        let rows = response
            .sections
            .into_iter()
            .map(|section| SectionRow {
                status: classify(&section, response.current_seq),
                section,
            })
            .collect();
        Ok(ProgressView::Sections {
            rows,
            current_seq: response.current_seq,
        })
    }

    /// Move the boundary to the end of `section`, then refresh.
    ///
    /// The boundary write must complete before the refreshed classification
    /// is trusted; a failed write skips the refresh so the prior displayed
    /// boundary remains authoritative.
    pub async fn mark_read(&self, section: &Section) -> Result<ProgressView, ProgressError> {
        self.settings.set_boundary(section.max_seq).await?;
        tracing::debug!(title = %section.title, seq = section.max_seq, "boundary advanced");
        self.refresh().await
    }
}
