//! Progress command - per-section reading status
//!
//! Shows the section list classified against the current read boundary and
//! provides the "mark section as read" action.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use config::ClientConfig;
use session::{ProgressTracker, ProgressView};

use crate::output;

#[derive(Args)]
pub struct ProgressArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MarkReadArgs {
    /// Title of the section to mark as read
    pub title: String,
}

fn tracker(config: &ClientConfig) -> Result<ProgressTracker> {
    let backend = super::backend(config)?;
    let settings = super::synchronizer(config, backend.clone());
    Ok(ProgressTracker::new(backend, settings))
}

pub async fn run(args: ProgressArgs, config: &ClientConfig) -> Result<()> {
    let view = tracker(config)?.refresh().await?;
    render(&view, args.json);
    Ok(())
}

pub async fn run_mark_read(args: MarkReadArgs, config: &ClientConfig) -> Result<()> {
    let tracker = tracker(config)?;
    let view = tracker.refresh().await?;
    let ProgressView::Sections { rows, .. } = &view else {
        bail!("no sections found - run a reindex first");
    };
    let Some(row) = rows.iter().find(|r| r.section.title == args.title) else {
        bail!("no section titled '{}'", args.title);
    };

    let section = row.section.clone();
    let after = tracker.mark_read(&section).await?;
    output::success(&format!(
        "boundary moved to seq {}",
        section.max_seq
    ));
    render(&after, false);
    Ok(())
}

fn render(view: &ProgressView, json: bool) {
    match view {
        ProgressView::ReindexRequired => {
            if json {
                println!("{}", serde_json::json!({"reindex_required": true}));
            } else {
                output::warn("no sections found - reindex required");
            }
        }
        ProgressView::Sections { rows, current_seq } => {
            if json {
                let out = serde_json::json!({
                    "current_seq": current_seq,
                    "sections": rows,
                });
                println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
                return;
            }
            output::header("Reading progress");
            match current_seq {
                Some(seq) => println!("  {} {}", "boundary:".dimmed(), seq),
                None => println!("  {} {}", "boundary:".dimmed(), "unset".dimmed()),
            }
            println!();
            for row in rows {
                println!(
                    "  [{}] {} {}",
                    output::status_tag(row.status),
                    row.section.title.bold(),
                    format!(
                        "seq {}-{} · {} fragments",
                        row.section.min_seq, row.section.max_seq, row.section.count
                    )
                    .dimmed()
                );
            }
        }
    }
}
