//! Transcription module for yt-cheatsheet.
//!
//! Obtains the full transcript text of a video. Captions are tried first; when the
//! video has none, the audio track is downloaded and sent to a speech-to-text
//! provider (OpenAI Whisper by default).

mod acquirer;
mod whisper;

pub use acquirer::{Transcript, TranscriptAcquirer, TranscriptOrigin};
pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A piece of text returned by a speech-to-text provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file. An empty result means the provider heard nothing.
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<TranscriptSegment>>;

    /// Fail early when a call could never succeed, e.g. without a credential.
    fn check_ready(&self) -> Result<()> {
        Ok(())
    }
}
