use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = config::ClientConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Chat(args) => commands::chat::run(args, &config).await,
        Commands::Export(args) => commands::chat::run_export(args, &config).await,
        Commands::Progress(args) => commands::progress::run(args, &config).await,
        Commands::MarkRead(args) => commands::progress::run_mark_read(args, &config).await,
        Commands::Settings(cmd) => commands::settings::run(cmd, &config).await,
        Commands::Search(args) => commands::search::run(args, &config).await,
        Commands::Info(args) => commands::info::run(args, &config).await,
    }
}
