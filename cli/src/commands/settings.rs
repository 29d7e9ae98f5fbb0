//! Settings command - remote settings with local offline override

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use config::ClientConfig;
use cr_core::types::Settings;

use crate::output;

#[derive(Subcommand)]
pub enum SettingsCommand {
    #[command(about = "Show current settings (offline override applied)")]
    Show(ShowArgs),

    #[command(about = "Change one or more settings fields")]
    Set(SetArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SetArgs {
    /// Set the read boundary to this sequence position
    #[arg(long, conflicts_with = "clear_boundary")]
    pub boundary: Option<u64>,

    /// Clear the read boundary
    #[arg(long)]
    pub clear_boundary: bool,

    /// Toggle offline mode
    #[arg(long)]
    pub offline: Option<bool>,

    /// Socratic level
    #[arg(long)]
    pub socratic: Option<u32>,

    /// Reply limit in characters
    #[arg(long)]
    pub reply_limit: Option<u32>,
}

pub async fn run(command: SettingsCommand, config: &ClientConfig) -> Result<()> {
    let backend = super::backend(config)?;
    let sync = super::synchronizer(config, backend);

    match command {
        SettingsCommand::Show(args) => {
            let settings = sync.load().await?;
            render(&settings, args.json);
        }
        SettingsCommand::Set(args) => {
            let patch = cr_core::types::SettingsPatch {
                read_boundary_seq: if args.clear_boundary {
                    Some(None)
                } else {
                    args.boundary.map(Some)
                },
                offline: args.offline,
                socratic_level: args.socratic,
                reply_limit_chars: args.reply_limit,
            };
            if patch == cr_core::types::SettingsPatch::default() {
                output::warn("nothing to change");
                return Ok(());
            }
            let written = sync.save(patch).await?;
            output::success("settings saved");
            render(&written, false);
        }
    }
    Ok(())
}

fn render(settings: &Settings, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(settings).unwrap_or_default()
        );
        return;
    }
    output::header("Settings");
    match settings.read_boundary_seq {
        Some(seq) => println!("  {} {}", "read boundary:".dimmed(), seq),
        None => println!("  {} {}", "read boundary:".dimmed(), "unset".dimmed()),
    }
    println!("  {} {}", "offline:".dimmed(), settings.offline);
    println!("  {} {}", "socratic level:".dimmed(), settings.socratic_level);
    println!(
        "  {} {}",
        "reply limit:".dimmed(),
        settings.reply_limit_chars
    );
}
