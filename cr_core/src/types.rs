use serde::{Deserialize, Serialize};

/// Remote-owned settings record.
///
/// The backend is the single source of truth; the client only ever holds a
/// transient working copy for the duration of one read-modify-write cycle.
/// The lone exception is the `offline` flag, which is additionally cached
/// locally so it survives a server restart that resets settings to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Sequence position up to which the user has read; `None` = unset.
    #[serde(default)]
    pub read_boundary_seq: Option<u64>,
    #[serde(default)]
    pub offline: bool,
    #[serde(default = "default_socratic_level")]
    pub socratic_level: u32,
    #[serde(default = "default_reply_limit")]
    pub reply_limit_chars: u32,
}

fn default_socratic_level() -> u32 {
    2
}

fn default_reply_limit() -> u32 {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            read_boundary_seq: None,
            offline: false,
            socratic_level: default_socratic_level(),
            reply_limit_chars: default_reply_limit(),
        }
    }
}

impl Settings {
    /// Pure merge of a partial update over a base record.
    ///
    /// Fields absent from the patch keep the base value. This is the only
    /// way settings mutations are expressed; the synchronizer's `save` is
    /// fetch-current, `merge`, write-back (last-write-wins, no version
    /// token).
    #[must_use]
    pub fn merge(&self, patch: &SettingsPatch) -> Settings {
        Settings {
            read_boundary_seq: patch
                .read_boundary_seq
                .unwrap_or(self.read_boundary_seq),
            offline: patch.offline.unwrap_or(self.offline),
            socratic_level: patch.socratic_level.unwrap_or(self.socratic_level),
            reply_limit_chars: patch.reply_limit_chars.unwrap_or(self.reply_limit_chars),
        }
    }
}

/// Partial settings update.
///
/// `read_boundary_seq` is doubly optional: the outer `Option` is "field
/// untouched", the inner one distinguishes setting a boundary from clearing
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub read_boundary_seq: Option<Option<u64>>,
    pub offline: Option<bool>,
    pub socratic_level: Option<u32>,
    pub reply_limit_chars: Option<u32>,
}

impl SettingsPatch {
    pub fn boundary(seq: Option<u64>) -> Self {
        Self {
            read_boundary_seq: Some(seq),
            ..Self::default()
        }
    }

    pub fn offline(value: bool) -> Self {
        Self {
            offline: Some(value),
            ..Self::default()
        }
    }

    pub fn socratic_level(level: u32) -> Self {
        Self {
            socratic_level: Some(level),
            ..Self::default()
        }
    }

    pub fn reply_limit(chars: u32) -> Self {
        Self {
            reply_limit_chars: Some(chars),
            ..Self::default()
        }
    }
}

/// Contiguous range of sequence positions with a title and fragment count.
///
/// Supplied by the backend in sequence order; immutable for the lifetime of
/// one progress view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub min_seq: u64,
    pub max_seq: u64,
    pub count: u64,
}

/// Derived per-section reading status; never stored, always recomputed from
/// `(section, boundary)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Done,
    Current,
    Pending,
}

/// Response of `GET /progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressResponse {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub current_seq: Option<u64>,
}

/// Quoted fragment with file/anchor identifying its source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub file: String,
    pub anchor: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub title: String,
}

/// One assistant answer with its citations; immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub reply: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// Bibliographic record picked from a search result; optional for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMeta {
    pub zotero_key: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Payload shared by `POST /export/preview` and `POST /export`.
///
/// Both phases of one transaction must send the identical payload: the
/// commit persists exactly what was previewed. `book` serializes as `null`
/// when no bibliographic record is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub reply: String,
    pub citations: Vec<Citation>,
    pub title: String,
    pub book: Option<BookMeta>,
}

/// Response of `POST /export/preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPreview {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub suggested_path: String,
}

/// Response of `POST /export`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
    pub status: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExportOutcome {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Response of `GET /settings/info`; display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    #[serde(default)]
    pub openai_configured: bool,
    #[serde(default)]
    pub zotero_configured: bool,
}

/// Request body of `POST /zotero/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoteroQuery {
    pub q: String,
}

/// Response of `POST /zotero/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoteroResults {
    #[serde(default)]
    pub items: Vec<BookMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_empty_patch_is_identity() {
        let base = Settings {
            read_boundary_seq: Some(42),
            offline: true,
            socratic_level: 3,
            reply_limit_chars: 800,
        };
        assert_eq!(base.merge(&SettingsPatch::default()), base);
    }

    #[test]
    fn test_merge_boundary_clear_writes_null() {
        let base = Settings {
            read_boundary_seq: Some(42),
            ..Settings::default()
        };
        let merged = base.merge(&SettingsPatch::boundary(None));
        assert_eq!(merged.read_boundary_seq, None);
        assert_eq!(merged.reply_limit_chars, base.reply_limit_chars);
    }

    #[test]
    fn test_merge_single_field_leaves_others() {
        let base = Settings::default();
        let merged = base.merge(&SettingsPatch::offline(true));
        assert!(merged.offline);
        assert_eq!(merged.read_boundary_seq, None);
        assert_eq!(merged.socratic_level, 2);
    }

    #[test]
    fn test_settings_round_trips_null_boundary() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"read_boundary_seq\":null"));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_settings_tolerates_unknown_fields() {
        let settings: Settings = serde_json::from_str(
            r#"{"read_boundary_seq": 7, "offline": false, "socratic_level": 1,
                "reply_limit_chars": 300, "future_field": "ignored"}"#,
        )
        .unwrap();
        assert_eq!(settings.read_boundary_seq, Some(7));
    }

    #[test]
    fn test_export_payload_serializes_absent_book_as_null() {
        let payload = ExportPayload {
            reply: "r".to_string(),
            citations: vec![],
            title: "Coreader".to_string(),
            book: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"book\":null"));
    }

    #[test]
    fn test_export_outcome_status_mapping() {
        let ok: ExportOutcome =
            serde_json::from_str(r#"{"status":"ok","path":"notes/2024-x.md"}"#).unwrap();
        assert!(ok.is_ok());
        assert_eq!(ok.path.as_deref(), Some("notes/2024-x.md"));

        let err: ExportOutcome =
            serde_json::from_str(r#"{"status":"error","message":"disk full"}"#).unwrap();
        assert!(!err.is_ok());
        assert_eq!(err.message.as_deref(), Some("disk full"));
    }
}
