//! # Session Cores
//!
//! The three stateful cores of the Coreader client, coupled only through an
//! explicit [`state::SessionState`] value object:
//!
//! - [`settings::SettingsSynchronizer`] — reconciles the remote settings
//!   record with the locally cached offline override
//! - [`progress::ProgressTracker`] — classifies document sections against
//!   the read boundary
//! - [`export::ExportTransaction`] — preview-then-confirm protocol for
//!   persisting an assistant answer as a note
//!
//! Everything else in the client is display logic with no state machine of
//! its own and lives outside this crate.

pub mod export;
pub mod progress;
pub mod settings;
pub mod state;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod test_support;

pub use export::{ExportPhase, ExportTransaction};
pub use progress::{ProgressTracker, ProgressView, SectionRow, classify};
pub use settings::{FileOfflineCache, OfflineCache, SettingsSynchronizer};
pub use state::SessionState;
