//! YouTube metadata resolution via yt-dlp.

use super::{parse_video_url, VideoMetadata, VideoResolver, VideoUrl};
use crate::error::{CheatsheetError, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Resolves video metadata by asking yt-dlp for the video's JSON description.
#[derive(Debug, Default, Clone)]
pub struct YtDlpResolver;

impl YtDlpResolver {
    pub fn new() -> Self {
        Self
    }

    /// Fetch metadata JSON using yt-dlp.
    #[instrument(skip(self), fields(video_id = %video.video_id))]
    async fn fetch_metadata_ytdlp(&self, video: &VideoUrl) -> Result<VideoMetadata> {
        let url = video.watch_url();

        let output = tokio::process::Command::new("yt-dlp")
            .args(["--dump-json", "--no-download", "--no-warnings", "--no-playlist", &url])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CheatsheetError::ToolNotFound("yt-dlp".to_string())
                } else {
                    CheatsheetError::MissingMetadata(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CheatsheetError::MissingMetadata(format!(
                "Video {} not found or unavailable: {}",
                video.video_id,
                stderr.trim()
            )));
        }

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        debug!("Received yt-dlp metadata");

        parse_metadata(&json, video)
    }
}

/// Build [`VideoMetadata`] from yt-dlp's `--dump-json` output.
fn parse_metadata(json: &serde_json::Value, video: &VideoUrl) -> Result<VideoMetadata> {
    let title = json["title"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CheatsheetError::MissingMetadata(video.video_id.clone()))?
        .to_string();

    let author = json["channel"]
        .as_str()
        .or_else(|| json["uploader"].as_str())
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| {
            CheatsheetError::MissingMetadata(format!("{} has no author", video.video_id))
        })?
        .to_string();

    // yt-dlp returns the date as YYYYMMDD
    let publish_date = json["upload_date"]
        .as_str()
        .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y%m%d").ok());

    let description = json["description"].as_str().unwrap_or_default().to_string();

    let video_id = json["id"]
        .as_str()
        .unwrap_or(&video.video_id)
        .to_string();

    Ok(VideoMetadata {
        title,
        publish_date,
        author,
        url: format!("https://youtube.com/watch?v={}", video_id),
        description,
        video_id,
    })
}

#[async_trait]
impl VideoResolver for YtDlpResolver {
    async fn resolve(&self, url: &str) -> Result<VideoMetadata> {
        let video = parse_video_url(url)?;
        self.fetch_metadata_ytdlp(&video).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video() -> VideoUrl {
        parse_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap()
    }

    #[test]
    fn test_parse_metadata() {
        let json = json!({
            "id": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "channel": "Rick Astley",
            "upload_date": "20091025",
            "description": "The official video.",
        });

        let metadata = parse_metadata(&json, &video()).unwrap();
        assert_eq!(metadata.title, "Never Gonna Give You Up");
        assert_eq!(metadata.author, "Rick Astley");
        assert_eq!(metadata.publish_date_string(), "2009-10-25");
        assert_eq!(metadata.url, "https://youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(metadata.video_id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_metadata_uploader_fallback() {
        let json = json!({ "title": "Talk", "uploader": "Conference" });

        let metadata = parse_metadata(&json, &video()).unwrap();
        assert_eq!(metadata.author, "Conference");
        assert_eq!(metadata.publish_date, None);
        assert_eq!(metadata.description, "");
    }

    #[test]
    fn test_parse_metadata_without_title() {
        let json = json!({ "title": "  ", "channel": "Someone" });
        assert!(matches!(
            parse_metadata(&json, &video()),
            Err(CheatsheetError::MissingMetadata(_))
        ));

        let json = json!({ "channel": "Someone" });
        assert!(matches!(
            parse_metadata(&json, &video()),
            Err(CheatsheetError::MissingMetadata(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_rejects_invalid_url_before_fetching() {
        let resolver = YtDlpResolver::new();
        let err = resolver.resolve("https://example.com/video").await.unwrap_err();
        assert!(matches!(err, CheatsheetError::InvalidUrl(_)));
    }
}
