//! Newsdesk command-line binary.

mod cli;

use clap::Parser;
use cli::{Cli, dispatch, progress_sink};
use newsdesk::{StudioConfig, gemini_studio_with_sink, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json).map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let config = StudioConfig::load_from(cli.config.as_deref())?;
    let studio = gemini_studio_with_sink(&config, progress_sink())?;

    dispatch(&studio, cli.command).await
}
