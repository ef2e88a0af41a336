//! Command-line structure.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Newsdesk - news video content studio
#[derive(Parser, Debug)]
#[command(name = "newsdesk")]
#[command(about = "Generate scripts, anchor images, social copy and B-roll for news stories")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./newsdesk.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where generated files are written.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory
    #[arg(long, default_value = "newsdesk-output")]
    pub out: PathBuf,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a package for one story from a headline or article URL
    Single {
        /// Headline in any language (takes precedence over --url)
        #[arg(long, required_unless_present = "url")]
        headline: Option<String>,

        /// Article URL
        #[arg(long)]
        url: Option<String>,

        /// Language of the headline, if known
        #[arg(long)]
        language: Option<String>,

        /// Reference image used as visual context
        #[arg(long)]
        image: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate a roundup package from two or three headlines
    Multi {
        /// Headline; give two or three times
        #[arg(long = "headline", required = true)]
        headlines: Vec<String>,

        /// Reference image for a story, as INDEX=PATH (INDEX starts at 1)
        #[arg(long = "image", value_parser = parse_story_image)]
        images: Vec<(usize, PathBuf)>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render a 16:9 thumbnail from an edited prompt
    Thumbnail {
        /// Thumbnail description
        #[arg(long)]
        prompt: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render one 16:9 still per prompt
    BRoll {
        /// B-roll description; repeat for more stills
        #[arg(long = "prompt", required = true)]
        prompts: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Split a script into paragraphs with one video prompt each
    Paragraphs {
        /// File containing the narration script
        #[arg(long)]
        script_file: PathBuf,

        /// The script came from a roundup; only its FULL SCRIPT section is used
        #[arg(long)]
        roundup: bool,

        /// Write paragraphs.json here instead of printing to stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_story_image(value: &str) -> Result<(usize, PathBuf), String> {
    let (index, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=PATH, got '{value}'"))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("'{index}' is not a story number"))?;
    if index == 0 || path.trim().is_empty() {
        return Err(format!("expected INDEX=PATH with INDEX from 1, got '{value}'"));
    }
    Ok((index, PathBuf::from(path.trim())))
}
