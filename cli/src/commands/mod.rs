pub mod chat;
pub mod info;
pub mod progress;
pub mod search;
pub mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use api::BackendApi;
use clap::{Parser, Subcommand};
use config::ClientConfig;
use session::{FileOfflineCache, SettingsSynchronizer};

#[derive(Parser)]
#[command(
    name = "coreader",
    author,
    version,
    about = "Coreader - reading-companion chat client",
    long_about = "Chat about the book you are reading, track reading progress, and export \
                  assistant answers as annotated notes.\n\nThe backend URL comes from \
                  COREADER_BASE_URL, a config file, or defaults to http://127.0.0.1:8000."
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Send a chat message; optionally export the answer as a note")]
    Chat(chat::ChatArgs),

    #[command(about = "Send a message and export its answer as an annotated note")]
    Export(chat::ExportArgs),

    #[command(about = "Show reading progress per section")]
    Progress(progress::ProgressArgs),

    #[command(name = "mark-read", about = "Mark a section as read by title")]
    MarkRead(progress::MarkReadArgs),

    #[command(subcommand, about = "Show or change settings")]
    Settings(settings::SettingsCommand),

    #[command(about = "Search the bibliographic library")]
    Search(search::SearchArgs),

    #[command(about = "Show backend provider status")]
    Info(info::InfoArgs),
}

/// Shared wiring: one backend client plus the settings synchronizer bound
/// to the configured cache directory.
pub fn backend(config: &ClientConfig) -> Result<Arc<BackendApi>> {
    Ok(Arc::new(BackendApi::from_config(config)?))
}

pub fn synchronizer(config: &ClientConfig, backend: Arc<BackendApi>) -> Arc<SettingsSynchronizer> {
    Arc::new(SettingsSynchronizer::new(
        backend,
        Box::new(FileOfflineCache::new(&config.cache_dir)),
    ))
}
