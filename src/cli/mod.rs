//! CLI module for yt-cheatsheet.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::orchestrator::RunOptions;
use clap::Parser;
use std::path::PathBuf;

/// yt-cheatsheet - Markdown cheatsheets from YouTube videos
///
/// Fetches a video's transcript (or transcribes its audio when no captions exist),
/// then asks an OpenAI chat model for key takeaways and a blog-post style summary.
/// The document is printed to stdout unless --write or --path is given.
#[derive(Parser, Debug)]
#[command(name = "yt-cheatsheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YouTube video URL
    pub url: String,

    /// Include the key takeaways list (default)
    #[arg(long, overrides_with = "no_takeaways")]
    pub takeaways: bool,

    /// Leave out the key takeaways list
    #[arg(long, overrides_with = "takeaways")]
    pub no_takeaways: bool,

    /// Include the blog-post summary (default)
    #[arg(long, visible_alias = "article", overrides_with = "no_summary")]
    pub summary: bool,

    /// Leave out the blog-post summary
    #[arg(long, visible_alias = "no-article", overrides_with = "summary")]
    pub no_summary: bool,

    /// Include the video metadata block (default)
    #[arg(long, overrides_with = "no_metadata")]
    pub metadata: bool,

    /// Leave out the video metadata block
    #[arg(long, overrides_with = "metadata")]
    pub no_metadata: bool,

    /// Write the cheatsheet to the configured output directory instead of stdout
    #[arg(short, long)]
    pub write: bool,

    /// Write the cheatsheet into this directory instead of stdout
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Chat model to use for generation
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature for generation
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Cli {
    /// Sections requested on the command line; every section is on unless negated.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            takeaways: !self.no_takeaways,
            summary: !self.no_summary,
            metadata: !self.no_metadata,
        }
    }

    /// Directory to write into, if the document goes to a file.
    pub fn output_dir(&self, default_dir: PathBuf) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(path.clone()),
            None if self.write => Some(default_dir),
            None => None,
        }
    }
}
