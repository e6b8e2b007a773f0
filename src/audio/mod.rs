//! Audio retrieval for videos without usable captions.

mod downloader;

pub use downloader::{download_audio, split_audio, MAX_UPLOAD_BYTES, SEGMENT_SECONDS};

use crate::error::Result;
use crate::video::VideoMetadata;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Trait for fetching a video's audio track to local disk.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Save the audio-only stream of `video` inside `dir`.
    ///
    /// Returns one or more files in playback order, each small enough to upload
    /// to the transcription provider on its own.
    async fn fetch_audio(&self, video: &VideoMetadata, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Audio fetcher backed by yt-dlp, with ffmpeg segmenting for large downloads.
#[derive(Debug, Clone)]
pub struct YtDlpAudio {
    max_upload_bytes: u64,
    segment_seconds: u32,
}

impl Default for YtDlpAudio {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            segment_seconds: SEGMENT_SECONDS,
        }
    }
}

impl YtDlpAudio {
    pub fn new() -> Self {
        Self::default()
    }

    fn needs_split(&self, path: &Path) -> Result<bool> {
        Ok(std::fs::metadata(path)?.len() > self.max_upload_bytes)
    }
}

#[async_trait]
impl AudioFetcher for YtDlpAudio {
    async fn fetch_audio(&self, video: &VideoMetadata, dir: &Path) -> Result<Vec<PathBuf>> {
        let audio = download_audio(&video.url, &video.video_id, dir).await?;

        if !self.needs_split(&audio)? {
            return Ok(vec![audio]);
        }

        info!("Audio exceeds the upload limit, splitting into segments");
        let segments_dir = dir.join("segments");
        std::fs::create_dir_all(&segments_dir)?;
        split_audio(&audio, &segments_dir, self.segment_seconds).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_split_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.m4a");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let fetcher = YtDlpAudio {
            max_upload_bytes: 64,
            segment_seconds: SEGMENT_SECONDS,
        };
        assert!(!fetcher.needs_split(&path).unwrap());

        std::fs::write(&path, vec![0u8; 65]).unwrap();
        assert!(fetcher.needs_split(&path).unwrap());
    }
}
