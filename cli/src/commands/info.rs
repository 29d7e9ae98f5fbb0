//! Info command - backend provider status badges

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use config::ClientConfig;
use cr_core::traits::Backend;

use crate::output;

#[derive(Args)]
pub struct InfoArgs {}

pub async fn run(_args: InfoArgs, config: &ClientConfig) -> Result<()> {
    let backend = super::backend(config)?;
    let info = backend.provider_info().await?;

    output::header("Providers");
    println!("  {} {}", "openai:".dimmed(), badge(info.openai_configured));
    println!("  {} {}", "zotero:".dimmed(), badge(info.zotero_configured));
    Ok(())
}

fn badge(configured: bool) -> colored::ColoredString {
    if configured {
        "configured".green()
    } else {
        "not configured".yellow()
    }
}
