//! Video resolution for yt-cheatsheet.
//!
//! Validates YouTube URLs and turns them into [`VideoMetadata`] through a
//! [`VideoResolver`] implementation.

mod youtube;

pub use youtube::YtDlpResolver;

use crate::error::{CheatsheetError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Metadata about a single YouTube video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title.
    pub title: String,
    /// Publication date (if the provider reports one).
    pub publish_date: Option<NaiveDate>,
    /// Channel or uploader name.
    pub author: String,
    /// Canonical watch URL.
    pub url: String,
    /// Description as published.
    pub description: String,
    /// YouTube video ID.
    pub video_id: String,
}

impl VideoMetadata {
    /// Publication date formatted as YYYY-MM-DD, or "unknown".
    pub fn publish_date_string(&self) -> String {
        self.publish_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Description with every line moved onto its own tab-indented line.
    pub fn formatted_description(&self) -> String {
        self.description
            .split('\n')
            .map(|line| format!("\n\t{}", line))
            .collect()
    }

    /// Render the metadata block appended to the cheatsheet.
    ///
    /// One `key: value` line per field; the video ID is left out.
    pub fn metadata_string(&self) -> String {
        [
            format!("title: {}", self.title),
            format!("publish_date: {}", self.publish_date_string()),
            format!("author: {}", self.author),
            format!("url: {}", self.url),
            format!("description: {}", self.formatted_description()),
        ]
        .join("\n")
    }
}

/// A validated YouTube URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrl {
    /// The URL with everything after the first `&` removed.
    pub url: String,
    /// The 11-character video ID.
    pub video_id: String,
}

impl VideoUrl {
    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://youtube.com/watch?v={}", self.video_id)
    }
}

fn video_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            ^(?:https?://)?
            (?:www\.|m\.|music\.)?
            (?:
                youtube\.com/(?:watch\?v=|shorts/|embed/|live/|v/)
                |
                youtu\.be/
            )
            ([a-zA-Z0-9_-]{11})
            (?:[?\#/].*)?$
        ",
        )
        .expect("video URL regex is valid")
    })
}

/// Validate a YouTube watch/shorts URL and extract its video ID.
///
/// Query parameters after the first `&` are discarded before matching.
pub fn parse_video_url(input: &str) -> Result<VideoUrl> {
    let url = input.trim().split('&').next().unwrap_or_default();

    let video_id = video_url_regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| CheatsheetError::InvalidUrl(input.to_string()))?;

    Ok(VideoUrl {
        url: url.to_string(),
        video_id,
    })
}

/// Trait for video metadata providers.
#[async_trait]
pub trait VideoResolver: Send + Sync {
    /// Validate the URL and fetch the video's metadata.
    async fn resolve(&self, url: &str) -> Result<VideoMetadata>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VideoMetadata {
        VideoMetadata {
            title: "Rust in 100 Seconds".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2021, 9, 20),
            author: "Fireship".to_string(),
            url: "https://youtube.com/watch?v=5C_HPTJg5ek".to_string(),
            description: "Learn Rust.\nFast.".to_string(),
            video_id: "5C_HPTJg5ek".to_string(),
        }
    }

    #[test]
    fn test_parse_video_url() {
        let parsed = parse_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(parsed.video_id, "dQw4w9WgXcQ");

        assert_eq!(
            parse_video_url("https://youtu.be/dQw4w9WgXcQ").unwrap().video_id,
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            parse_video_url("https://youtube.com/shorts/dQw4w9WgXcQ?feature=share")
                .unwrap()
                .video_id,
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            parse_video_url("youtube.com/embed/dQw4w9WgXcQ").unwrap().video_id,
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_parse_video_url_drops_extra_params() {
        let parsed =
            parse_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123&t=42s")
                .unwrap();
        assert_eq!(parsed.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(parsed.watch_url(), "https://youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_video_url_rejects_invalid() {
        for input in [
            "",
            "dQw4w9WgXcQ",
            "https://vimeo.com/123456",
            "https://www.youtube.com/playlist?list=PL123",
            "https://www.youtube.com/watch?v=short",
        ] {
            assert!(
                matches!(parse_video_url(input), Err(CheatsheetError::InvalidUrl(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_metadata_string() {
        let expected = "title: Rust in 100 Seconds\n\
                        publish_date: 2021-09-20\n\
                        author: Fireship\n\
                        url: https://youtube.com/watch?v=5C_HPTJg5ek\n\
                        description: \n\tLearn Rust.\n\tFast.";
        assert_eq!(sample().metadata_string(), expected);
    }

    #[test]
    fn test_metadata_string_without_date() {
        let mut video = sample();
        video.publish_date = None;
        assert!(video.metadata_string().contains("publish_date: unknown"));
        assert!(!video.metadata_string().contains("video_id"));
    }
}
