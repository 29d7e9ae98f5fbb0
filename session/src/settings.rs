//! Settings synchronizer.
//!
//! Single source of truth reconciliation between the remote settings record
//! and a locally cached override for the `offline` flag. Every settings
//! mutation routes through [`SettingsSynchronizer::save`], a fetch-current,
//! merge, write-back cycle. There is no version token: two overlapping
//! `save` calls race and the result is last-write-wins (accepted for the
//! single-user client; the `SettingsPatch` surface leaves room for an
//! optimistic token later without breaking callers).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cr_core::traits::Backend;
use cr_core::types::{Settings, SettingsPatch};
use errors::SettingsError;
use serde::{Deserialize, Serialize};

/// Locally persisted tri-state override for the `offline` flag:
/// unset / true / false.
pub trait OfflineCache: Send + Sync {
    fn get(&self) -> Result<Option<bool>, SettingsError>;
    fn set(&self, value: bool) -> Result<(), SettingsError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedOverride {
    offline: bool,
}

/// File-backed offline override, surviving client restarts independently of
/// the remote settings store.
pub struct FileOfflineCache {
    path: PathBuf,
}

impl FileOfflineCache {
    /// The cache lives at `<cache_dir>/coreader_offline.json`.
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            path: cache_dir.join("coreader_offline.json"),
        }
    }
}

impl OfflineCache for FileOfflineCache {
    /// An unreadable or unparsable cache file reads as "override unset";
    /// the next successful `set` rewrites it.
    fn get(&self) -> Result<Option<bool>, SettingsError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unreadable offline cache, treating override as unset"
                );
                return Ok(None);
            }
        };
        match serde_json::from_str::<CachedOverride>(&raw) {
            Ok(cached) => Ok(Some(cached.offline)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "corrupt offline cache, treating override as unset"
                );
                Ok(None)
            }
        }
    }

    fn set(&self, value: bool) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| SettingsError::Cache {
                reason: e.to_string(),
            })?;
        }
        let raw = serde_json::to_string(&CachedOverride { offline: value }).map_err(|e| {
            SettingsError::Cache {
                reason: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, raw).map_err(|e| SettingsError::Cache {
            reason: e.to_string(),
        })
    }
}

/// Read/write helper for the remote settings record.
pub struct SettingsSynchronizer {
    backend: Arc<dyn Backend>,
    cache: Box<dyn OfflineCache>,
}

impl SettingsSynchronizer {
    pub fn new(backend: Arc<dyn Backend>, cache: Box<dyn OfflineCache>) -> Self {
        Self { backend, cache }
    }

    /// Fetch the remote record, applying the local offline override.
    ///
    /// When an override exists it overwrites the fetched value and exactly
    /// one `save` pushes it back to the remote store — self-healing after a
    /// server restart that reset settings to defaults. A fetch error
    /// propagates untouched so the caller keeps its last-known state.
    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let settings = self.backend.get_settings().await?;
        match self.cache.get()? {
            Some(override_value) => {
                tracing::debug!(offline = override_value, "applying local offline override");
                let healed = self.save(SettingsPatch::offline(override_value)).await?;
                Ok(healed)
            }
            None => Ok(settings),
        }
    }

    /// Fetch-current, merge, write the full record back.
    ///
    /// On success the offline cache is updated to the value just written.
    /// On failure the error surfaces to the caller and neither the remote
    /// record nor the cache is partially applied.
    pub async fn save(&self, patch: SettingsPatch) -> Result<Settings, SettingsError> {
        let base = self.backend.get_settings().await?;
        let merged = base.merge(&patch);
        let written = self.backend.put_settings(&merged).await?;
        self.cache.set(merged.offline)?;
        Ok(written)
    }

    pub async fn set_boundary(&self, seq: u64) -> Result<Settings, SettingsError> {
        self.save(SettingsPatch::boundary(Some(seq))).await
    }

    /// Writes `read_boundary_seq = null`.
    pub async fn clear_boundary(&self) -> Result<Settings, SettingsError> {
        self.save(SettingsPatch::boundary(None)).await
    }

    pub async fn set_offline(&self, value: bool) -> Result<Settings, SettingsError> {
        self.save(SettingsPatch::offline(value)).await
    }

    pub async fn set_socratic_level(&self, level: u32) -> Result<Settings, SettingsError> {
        self.save(SettingsPatch::socratic_level(level)).await
    }

    pub async fn set_reply_limit(&self, chars: u32) -> Result<Settings, SettingsError> {
        self.save(SettingsPatch::reply_limit(chars)).await
    }
}
