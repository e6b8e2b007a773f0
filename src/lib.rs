//! yt-cheatsheet - Markdown cheatsheets from YouTube videos
//!
//! Turns a YouTube video into a markdown document with key takeaways, a
//! blog-post style summary and the video's metadata.
//!
//! # Overview
//!
//! A run goes through these steps, one after another:
//! - Validate the URL and fetch the video's metadata
//! - Fetch the caption track, or transcribe the audio when there is none
//! - Split the transcript into token-bounded chunks
//! - Send every chunk to a chat model, once for takeaways and once for the summary
//! - Render the document and print it or write it to a file
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `video` - URL validation and metadata lookup
//! - `captions` - Caption track retrieval
//! - `audio` - Audio download
//! - `transcription` - Speech-to-text and transcript acquisition
//! - `chunking` - Token-aware transcript splitting
//! - `summarize` - Chunked chat-completion generation
//! - `output` - Document rendering and file output
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use yt_cheatsheet::config::Settings;
//! use yt_cheatsheet::orchestrator::{Orchestrator, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let document = orchestrator
//!         .run("https://www.youtube.com/watch?v=5C_HPTJg5ek", &RunOptions::default())
//!         .await?;
//!     println!("{}", document.content);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod captions;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod output;
pub mod summarize;
pub mod transcription;
pub mod video;

pub use error::{CheatsheetError, Result};
