//! Transcript acquisition: captions first, audio transcription as the fallback.

use super::Transcriber;
use crate::audio::AudioFetcher;
use crate::captions::{captions_to_text, CaptionSource};
use crate::cli::Output;
use crate::error::{CheatsheetError, Result};
use crate::video::VideoMetadata;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Where a transcript came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptOrigin {
    /// The video's caption track.
    Captions,
    /// Speech-to-text over the downloaded audio.
    Generated,
}

/// Full transcript text of a video. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub origin: TranscriptOrigin,
}

/// Obtains a transcript for a video from captions or, failing that, from its audio.
pub struct TranscriptAcquirer {
    captions: Arc<dyn CaptionSource>,
    audio: Arc<dyn AudioFetcher>,
    transcriber: Arc<dyn Transcriber>,
}

impl TranscriptAcquirer {
    pub fn new(
        captions: Arc<dyn CaptionSource>,
        audio: Arc<dyn AudioFetcher>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            captions,
            audio,
            transcriber,
        }
    }

    /// Get the transcript for `video`.
    ///
    /// A caption miss triggers exactly one audio transcription attempt; any other
    /// caption error is returned as is.
    #[instrument(skip(self, video), fields(video_id = %video.video_id))]
    pub async fn acquire(&self, video: &VideoMetadata) -> Result<Transcript> {
        let miss = match self.captions.fetch_captions(&video.video_id).await {
            Ok(snippets) => {
                let text = captions_to_text(&snippets);
                if !text.is_empty() {
                    info!("Using caption track ({} snippets)", snippets.len());
                    return Ok(Transcript {
                        text,
                        origin: TranscriptOrigin::Captions,
                    });
                }
                CheatsheetError::NoCaptionsAvailable(video.video_id.clone())
            }
            Err(e) if e.is_caption_miss() => e,
            Err(e) => return Err(e),
        };

        warn!("No transcript found ({}), generating one from audio", miss);
        Output::warning("No transcript found, generating one from the audio track");
        self.generate_from_audio(video, miss).await
    }

    /// Transcribe the audio parts in order and join their text with single spaces.
    async fn generate_from_audio(
        &self,
        video: &VideoMetadata,
        miss: CheatsheetError,
    ) -> Result<Transcript> {
        // Nothing is downloaded when the transcription could never run.
        self.transcriber.check_ready()?;

        // Removed when dropped, on every return path below.
        let temp_dir = tempfile::tempdir()?;

        let parts = self.audio.fetch_audio(video, temp_dir.path()).await?;
        let mut texts = Vec::with_capacity(parts.len());

        for (index, part) in parts.iter().enumerate() {
            debug!("Transcribing audio part {}/{}", index + 1, parts.len());
            let segments = self.transcriber.transcribe(part).await?;

            if let Some(first) = segments.into_iter().next() {
                let text = first.text.trim().to_string();
                if !text.is_empty() {
                    texts.push(text);
                }
            }
        }

        if texts.is_empty() {
            return Err(CheatsheetError::TranscriptGenerationFailed(miss.to_string()));
        }

        info!("Generated transcript from {} audio part(s)", parts.len());
        Ok(Transcript {
            text: texts.join(" "),
            origin: TranscriptOrigin::Generated,
        })
    }
}
