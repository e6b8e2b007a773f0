//! Configuration settings for yt-cheatsheet.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the OpenAI credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub openai: OpenAISettings,
    pub captions: CaptionSettings,
    pub transcription: TranscriptionSettings,
    pub chunking: ChunkingSettings,
    pub output: OutputSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Chat-completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// Chat model used for takeaways and summaries.
    pub model: String,
    /// Sampling temperature for chat requests.
    pub temperature: f32,
    /// API key. Falls back to the OPENAI_API_KEY environment variable.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 1.0,
            api_key: None,
            timeout_seconds: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Caption retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    /// Preferred caption languages, in priority order.
    pub languages: Vec<String>,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
        }
    }
}

/// Audio transcription settings (used when captions are unavailable).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Speech-to-text model.
    pub model: String,
    /// Optional language hint (ISO-639-1).
    pub language: Option<String>,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
            language: None,
        }
    }
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk size in tokens.
    pub max_tokens: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            max_tokens: crate::chunking::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory used by `--write` when no `--path` is given.
    pub directory: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yt-cheatsheet")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded default output directory.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.output.directory)
    }

    /// Resolve the OpenAI credential once: the configured key wins, then the environment.
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(
            self.openai.api_key.as_deref(),
            std::env::var(API_KEY_ENV).ok().as_deref(),
        )
    }
}

fn resolve_api_key(configured: Option<&str>, from_env: Option<&str>) -> Option<String> {
    configured
        .filter(|k| !k.trim().is_empty())
        .or(from_env.filter(|k| !k.trim().is_empty()))
        .map(|k| k.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chunking.max_tokens, 10_000);
        assert_eq!(settings.openai.temperature, 1.0);
        assert_eq!(settings.captions.languages, vec!["en".to_string()]);
        assert_eq!(settings.output.directory, ".");
    }

    #[test]
    fn test_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [openai]
            model = "gpt-4o"

            [chunking]
            max_tokens = 2000
            "#,
        )
        .unwrap();

        assert_eq!(settings.openai.model, "gpt-4o");
        assert_eq!(settings.openai.temperature, 1.0);
        assert_eq!(settings.chunking.max_tokens, 2000);
        assert_eq!(settings.transcription.model, "whisper-1");
    }

    #[test]
    fn test_missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.openai.model, "gpt-4o-mini");
    }

    #[test]
    fn test_resolve_api_key() {
        assert_eq!(resolve_api_key(Some("sk-a"), Some("sk-b")), Some("sk-a".into()));
        assert_eq!(resolve_api_key(Some("  "), Some("sk-b")), Some("sk-b".into()));
        assert_eq!(resolve_api_key(None, Some("sk-b")), Some("sk-b".into()));
        assert_eq!(resolve_api_key(None, Some("")), None);
        assert_eq!(resolve_api_key(None, None), None);
    }
}
