//! Error types for yt-cheatsheet.

use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type for cheatsheet operations.
#[derive(Error, Debug)]
pub enum CheatsheetError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("No metadata available for video: {0}")]
    MissingMetadata(String),

    #[error("No captions found for video {0}")]
    NoCaptionsFound(String),

    #[error("Captions are disabled for video {0}")]
    CaptionsDisabled(String),

    #[error("No captions available for video {0}")]
    NoCaptionsAvailable(String),

    #[error("Transcript generation failed: {0}")]
    TranscriptGenerationFailed(String),

    #[error("Transcript must be specified")]
    TranscriptSplit,

    #[error("Invalid model: model identifier cannot be empty")]
    InvalidModel,

    #[error("OpenAI API key is not specified. Set it with: export OPENAI_API_KEY='sk-...'")]
    OpenAIKeyMissing,

    #[error("System message cannot be blank")]
    InvalidSystemMessage,

    #[error("Output file already exists: {}", .0.display())]
    FileExists(PathBuf),

    #[error("Output directory does not exist or is not a directory: {}", .0.display())]
    DirectoryInvalid(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Captions error: {0}")]
    Captions(String),

    #[error("Audio download failed: {0}")]
    AudioDownload(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),
}

impl CheatsheetError {
    /// Whether this error means the captions provider had nothing to offer,
    /// in which case the transcript is generated from audio instead.
    pub fn is_caption_miss(&self) -> bool {
        matches!(
            self,
            CheatsheetError::NoCaptionsFound(_)
                | CheatsheetError::CaptionsDisabled(_)
                | CheatsheetError::NoCaptionsAvailable(_)
        )
    }
}

/// Result type alias for cheatsheet operations.
pub type Result<T> = std::result::Result<T, CheatsheetError>;
