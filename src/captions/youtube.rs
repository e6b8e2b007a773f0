//! YouTube timed-text captions via yt-transcript-rs.

use super::{CaptionSnippet, CaptionSource};
use crate::error::{CheatsheetError, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

/// Caption source backed by YouTube's public transcript endpoints.
pub struct YoutubeCaptions {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YoutubeCaptions {
    /// Create a caption source preferring the given languages, in order.
    pub fn new(languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            CheatsheetError::Captions(format!("Failed to initialize transcript API: {}", e))
        })?;

        Ok(Self { api, languages })
    }
}

/// Map the provider's failure onto the caption-miss kinds where it is one.
fn classify(video_id: &str, err: CouldNotRetrieveTranscript) -> CheatsheetError {
    match &err.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled) => {
            CheatsheetError::CaptionsDisabled(video_id.to_string())
        }
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            CheatsheetError::NoCaptionsFound(video_id.to_string())
        }
        _ => CheatsheetError::Captions(err.to_string()),
    }
}

#[async_trait]
impl CaptionSource for YoutubeCaptions {
    #[instrument(skip(self))]
    async fn fetch_captions(&self, video_id: &str) -> Result<Vec<CaptionSnippet>> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| classify(video_id, e))?;

        let snippets: Vec<CaptionSnippet> = transcript
            .snippets
            .into_iter()
            .map(|s| CaptionSnippet {
                text: s.text,
                start: s.start,
                duration: s.duration,
            })
            .collect();

        if snippets.iter().all(|s| s.text.trim().is_empty()) {
            return Err(CheatsheetError::NoCaptionsAvailable(video_id.to_string()));
        }

        debug!("Fetched {} caption snippets", snippets.len());
        Ok(snippets)
    }
}
