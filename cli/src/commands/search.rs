//! Search command - bibliographic library lookup

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use config::ClientConfig;
use cr_core::traits::Backend;

use crate::output;

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: String,
}

pub async fn run(args: SearchArgs, config: &ClientConfig) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        output::warn("empty query, nothing to search");
        return Ok(());
    }

    let backend = super::backend(config)?;
    let results = backend.zotero_search(query).await?;
    if results.items.is_empty() {
        println!("Nothing found");
        return Ok(());
    }

    for item in &results.items {
        let year = item
            .year
            .map(|y| format!(" ({y})"))
            .unwrap_or_default();
        let authors = if item.authors.is_empty() {
            String::new()
        } else {
            format!(" — {}", item.authors.join(", "))
        };
        println!(
            "  {} {}{}{}",
            item.zotero_key.dimmed(),
            item.title.bold(),
            year,
            authors
        );
    }
    Ok(())
}
