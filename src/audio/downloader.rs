//! Audio download via yt-dlp.

use crate::error::{CheatsheetError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Audio container extensions yt-dlp commonly produces for audio-only streams.
const AUDIO_EXTENSIONS: &[&str] = &["m4a", "webm", "opus", "mp3", "ogg"];

/// Largest file the transcription endpoint accepts in one upload (25 MB).
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Segment length used when a download is too large to upload whole.
pub const SEGMENT_SECONDS: u32 = 600;

/// Downloads the best audio-only stream of a video into `output_dir`.
///
/// The file is named after the video ID; the extension is whatever container
/// YouTube serves the stream in.
#[instrument(skip(output_dir), fields(video_id = %video_id))]
pub async fn download_audio(url: &str, video_id: &str, output_dir: &Path) -> Result<PathBuf> {
    info!("Downloading audio from {}", url);

    let template = output_dir.join(format!("{}.%(ext)s", video_id));

    let result = Command::new("yt-dlp")
        .arg("--format").arg("bestaudio")
        .arg("--output").arg(&template)
        .arg("--no-playlist")
        .arg("--quiet")
        .arg("--no-warnings")
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CheatsheetError::ToolNotFound("yt-dlp".into()));
        }
        Err(e) => {
            return Err(CheatsheetError::AudioDownload(format!("yt-dlp execution failed: {e}")));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CheatsheetError::AudioDownload(format!("yt-dlp failed: {}", stderr.trim())));
    }

    find_audio_file(output_dir, video_id)
}

/// Splits `source` into consecutive segments of `chunk_seconds` inside `output_dir`.
///
/// Returns the segment paths in playback order. Audio no longer than one
/// segment is returned as is.
#[instrument(skip_all)]
pub async fn split_audio(source: &Path, output_dir: &Path, chunk_seconds: u32) -> Result<Vec<PathBuf>> {
    let total_duration = probe_duration(source).await?;
    info!("Total audio duration: {:.1}s", total_duration);

    let plan = segment_plan(total_duration, chunk_seconds as f64);
    if plan.len() <= 1 {
        return Ok(vec![source.to_path_buf()]);
    }

    let base_name = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio");
    let extension = source
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("m4a");

    let mut segments = Vec::with_capacity(plan.len());
    for (idx, (offset, length)) in plan.into_iter().enumerate() {
        let segment_path = output_dir.join(format!("{}_{:04}.{}", base_name, idx, extension));
        extract_segment(source, &segment_path, offset, length).await?;

        debug!("Created segment {} at offset {:.1}s", idx, offset);
        segments.push(segment_path);
    }

    info!("Created {} audio segments", segments.len());
    Ok(segments)
}

/// `(offset, length)` pairs covering `total` seconds in steps of `chunk_len`.
fn segment_plan(total: f64, chunk_len: f64) -> Vec<(f64, f64)> {
    if total <= chunk_len || chunk_len <= 0.0 {
        return vec![(0.0, total)];
    }

    let mut plan = Vec::new();
    let mut offset = 0.0;
    while offset < total {
        plan.push((offset, chunk_len.min(total - offset)));
        offset += chunk_len;
    }
    plan
}

/// Extracts a time segment from an audio file.
async fn extract_segment(source: &Path, dest: &Path, start: f64, length: f64) -> Result<()> {
    // Stream copy first; it keeps the container and needs no encoder.
    let copy_result = Command::new("ffmpeg")
        .arg("-ss").arg(format!("{:.3}", start))
        .arg("-i").arg(source)
        .arg("-t").arg(format!("{:.3}", length))
        .arg("-vn")
        .arg("-c").arg("copy")
        .arg("-y")
        .arg("-loglevel").arg("warning")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match copy_result {
        Ok(status) if status.success() && dest.exists() => return Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CheatsheetError::ToolNotFound("ffmpeg".into()));
        }
        _ => {}
    }

    warn!("Stream copy failed, re-encoding segment");
    let mp3_dest = dest.with_extension("mp3");

    let encode_result = Command::new("ffmpeg")
        .arg("-ss").arg(format!("{:.3}", start))
        .arg("-i").arg(source)
        .arg("-t").arg(format!("{:.3}", length))
        .arg("-vn")
        .arg("-codec:a").arg("libmp3lame")
        .arg("-qscale:a").arg("4")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(&mp3_dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match encode_result {
        Ok(out) if out.status.success() => {
            std::fs::rename(&mp3_dest, dest)?;
            Ok(())
        }
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(CheatsheetError::AudioDownload(format!("Segment extraction failed: {}", err.trim())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CheatsheetError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(CheatsheetError::AudioDownload(format!("ffmpeg error: {e}"))),
    }
}

/// Queries the duration of an audio file using ffprobe with JSON output.
async fn probe_duration(path: &Path) -> Result<f64> {
    let result = Command::new("ffprobe")
        .arg("-v").arg("quiet")
        .arg("-print_format").arg("json")
        .arg("-show_format")
        .arg(path)
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CheatsheetError::ToolNotFound("ffprobe".into()));
        }
        Err(e) => {
            return Err(CheatsheetError::AudioDownload(format!("ffprobe failed: {e}")));
        }
    };

    if !output.status.success() {
        return Err(CheatsheetError::AudioDownload("ffprobe returned error".into()));
    }

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|_| CheatsheetError::AudioDownload("Invalid ffprobe output".into()))?;

    parse_duration(&parsed)
}

fn parse_duration(probe: &serde_json::Value) -> Result<f64> {
    probe["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| CheatsheetError::AudioDownload("Could not determine audio duration".into()))
}

/// Locates a downloaded audio file by video ID.
fn find_audio_file(dir: &Path, video_id: &str) -> Result<PathBuf> {
    for ext in AUDIO_EXTENSIONS {
        let candidate = dir.join(format!("{}.{}", video_id, ext));
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    // Fallback: scan directory for matching prefix
    let entries = std::fs::read_dir(dir)
        .map_err(|e| CheatsheetError::AudioDownload(format!("Cannot read directory: {e}")))?;

    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(video_id) {
            return Ok(entry.path());
        }
    }

    Err(CheatsheetError::AudioDownload("Audio file not found after download".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_audio_file_known_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123.m4a"), b"audio").unwrap();

        let found = find_audio_file(dir.path(), "abc123").unwrap();
        assert_eq!(found, dir.path().join("abc123.m4a"));
    }

    #[test]
    fn test_find_audio_file_prefix_scan() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123.f251.weba"), b"audio").unwrap();

        let found = find_audio_file(dir.path(), "abc123").unwrap();
        assert_eq!(found, dir.path().join("abc123.f251.weba"));
    }

    #[test]
    fn test_segment_plan() {
        assert_eq!(segment_plan(300.0, 600.0), vec![(0.0, 300.0)]);
        assert_eq!(segment_plan(600.0, 600.0), vec![(0.0, 600.0)]);
        assert_eq!(
            segment_plan(1500.0, 600.0),
            vec![(0.0, 600.0), (600.0, 600.0), (1200.0, 300.0)]
        );
    }

    #[test]
    fn test_parse_duration() {
        let probe = serde_json::json!({ "format": { "duration": "2412.480000" } });
        assert_eq!(parse_duration(&probe).unwrap(), 2412.48);

        let probe = serde_json::json!({ "format": {} });
        assert!(matches!(
            parse_duration(&probe),
            Err(CheatsheetError::AudioDownload(_))
        ));
    }

    #[test]
    fn test_find_audio_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_audio_file(dir.path(), "abc123"),
            Err(CheatsheetError::AudioDownload(_))
        ));
    }
}
