//! Command-line interface for the newsdesk binary.

mod commands;
mod generate;
mod output;
mod progress;

pub use commands::{Cli, Commands};
pub use progress::progress_sink;

use newsdesk::Studio;

/// Run one subcommand against the studio.
pub async fn dispatch(studio: &Studio, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Single {
            headline,
            url,
            language,
            image,
            output,
        } => generate::single(studio, headline, url, language, image, &output.out).await,
        Commands::Multi {
            headlines,
            images,
            output,
        } => generate::multi(studio, headlines, images, &output.out).await,
        Commands::Thumbnail { prompt, output } => {
            generate::thumbnail(studio, &prompt, &output.out).await
        }
        Commands::BRoll { prompts, output } => {
            generate::b_roll(studio, &prompts, &output.out).await
        }
        Commands::Paragraphs {
            script_file,
            roundup,
            out,
        } => generate::paragraphs(studio, &script_file, roundup, out.as_deref()).await,
    }
}
