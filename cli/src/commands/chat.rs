//! Chat command - one exchange with the reading companion
//!
//! Sends a message, prints the answer with its citations, and optionally
//! runs the preview-then-confirm export flow on the answer.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use config::ClientConfig;
use cr_core::traits::Backend;
use session::{ExportTransaction, SessionState};

use crate::output;

#[derive(Args)]
pub struct ChatArgs {
    /// Message to send
    pub message: String,

    /// Export the answer as a note after the exchange
    #[arg(long, short)]
    pub export: bool,

    /// Bibliographic search query; the first match is attached to the note
    #[arg(long)]
    pub book: Option<String>,

    /// Confirm the export without prompting
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Message to send; its answer becomes the note body
    pub message: String,

    /// Bibliographic search query; the first match is attached to the note
    #[arg(long)]
    pub book: Option<String>,

    /// Confirm the export without prompting
    #[arg(long, short)]
    pub yes: bool,
}

/// `export` is `chat --export` under a dedicated name.
pub async fn run_export(args: ExportArgs, config: &ClientConfig) -> Result<()> {
    run(
        ChatArgs {
            message: args.message,
            export: true,
            book: args.book,
            yes: args.yes,
        },
        config,
    )
    .await
}

pub async fn run(args: ChatArgs, config: &ClientConfig) -> Result<()> {
    let backend = super::backend(config)?;
    let mut session = SessionState::new();

    let answer = backend.chat(&args.message).await?;
    println!("{}", answer.reply);
    if !answer.citations.is_empty() {
        println!();
        for cite in &answer.citations {
            output::citation(cite);
        }
    }
    session.record_answer(answer);

    if !args.export {
        return Ok(());
    }

    if let Some(query) = &args.book {
        match backend.zotero_search(query).await {
            Ok(results) => match results.items.into_iter().next() {
                Some(book) => {
                    output::info(&format!("attaching book: {}", book.title));
                    session.select_book(book);
                }
                None => output::warn("no bibliographic match, exporting without book"),
            },
            Err(e) => output::warn(&format!("bibliographic search failed: {e}")),
        }
    }

    export_flow(backend, &session, config, args.yes).await
}

async fn export_flow(
    backend: std::sync::Arc<api::BackendApi>,
    session: &SessionState,
    config: &ClientConfig,
    assume_yes: bool,
) -> Result<()> {
    let mut tx = ExportTransaction::new(backend, config.note_title.clone());

    let preview = match tx.begin(session).await {
        Ok(preview) => preview,
        Err(e) => {
            output::error(&format!("Preview failed: {e}"));
            return Ok(());
        }
    };

    println!();
    output::header("Note preview");
    println!("{}", preview.content);
    println!("{} {}", "path:".dimmed(), preview.suggested_path);

    let confirmed = assume_yes
        || dialoguer::Confirm::new()
            .with_prompt("Save this note?")
            .default(true)
            .interact()?;
    if !confirmed {
        tx.cancel();
        output::info("export cancelled");
        return Ok(());
    }

    match tx.confirm().await {
        Ok(outcome) if outcome.is_ok() => {
            output::success(&format!(
                "Saved: {}",
                outcome.path.unwrap_or_default()
            ));
        }
        Ok(outcome) => {
            output::error(&format!(
                "Error: {}",
                outcome.message.unwrap_or_else(|| "unknown".to_string())
            ));
        }
        Err(e) => output::error(&format!("Export failed: {e}")),
    }
    Ok(())
}
