//! Caption retrieval for yt-cheatsheet.
//!
//! A [`CaptionSource`] returns the timed caption track for a video, or one of the
//! caption-miss errors (`NoCaptionsFound`, `CaptionsDisabled`, `NoCaptionsAvailable`)
//! which send the pipeline down the audio transcription path.

mod youtube;

pub use youtube::YoutubeCaptions;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One timed caption fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSnippet {
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

/// Trait for caption providers.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch the caption track for a video ID.
    async fn fetch_captions(&self, video_id: &str) -> Result<Vec<CaptionSnippet>>;
}

/// Join caption fragments with single spaces, in timestamp order.
pub fn captions_to_text(snippets: &[CaptionSnippet]) -> String {
    let mut ordered: Vec<&CaptionSnippet> = snippets.iter().collect();
    ordered.sort_by(|a, b| a.start.total_cmp(&b.start));

    ordered
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(text: &str, start: f64) -> CaptionSnippet {
        CaptionSnippet {
            text: text.to_string(),
            start,
            duration: 1.5,
        }
    }

    #[test]
    fn test_captions_to_text_orders_by_start() {
        let snippets = vec![
            snippet("world", 2.0),
            snippet("hello", 0.0),
            snippet("again", 3.5),
        ];
        assert_eq!(captions_to_text(&snippets), "hello world again");
    }

    #[test]
    fn test_captions_to_text_skips_blank_fragments() {
        let snippets = vec![snippet(" one ", 0.0), snippet("\n", 1.0), snippet("two", 2.0)];
        assert_eq!(captions_to_text(&snippets), "one two");
    }
}
