//! Transcript chunking.
//!
//! Splits transcript text into pieces small enough for a single chat request.
//! Chunk order is preserved: each chunk is summarized on its own and the results
//! are concatenated in the same order.

mod token;

pub use token::TokenSplitter;

use crate::error::{CheatsheetError, Result};

/// Default maximum chunk size in tokens.
pub const DEFAULT_MAX_TOKENS: usize = 10_000;

/// Trait for text splitting strategies.
pub trait TextSplitter: Send + Sync {
    /// Split text into ordered, non-empty chunks. Blank input yields no chunks.
    fn split_text(&self, text: &str) -> Vec<String>;
}

/// Split a transcript into chunks.
///
/// Fails with `TranscriptSplit` when nothing is left to split. A transcript that
/// fits in one chunk is returned unchanged.
pub fn split_transcript(splitter: &dyn TextSplitter, transcript: &str) -> Result<Vec<String>> {
    let chunks = splitter.split_text(transcript);

    match chunks.len() {
        0 => Err(CheatsheetError::TranscriptSplit),
        1 => Ok(vec![transcript.to_string()]),
        _ => Ok(chunks),
    }
}
