//! OpenAI Whisper transcription implementation.

use super::{Transcriber, TranscriptSegment};
use crate::error::{CheatsheetError, Result};
use crate::openai::create_client_with_timeout;
use async_openai::config::OpenAIConfig;
use async_openai::types::{AudioInput, CreateTranscriptionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// OpenAI Whisper-based transcriber.
pub struct WhisperTranscriber {
    client: Client<OpenAIConfig>,
    has_key: bool,
    model: String,
    language: Option<String>,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber. Without a key, every call fails with `OpenAIKeyMissing`.
    pub fn with_config(
        api_key: Option<&str>,
        model: &str,
        language: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.map(str::trim).unwrap_or_default();
        Ok(Self {
            client: create_client_with_timeout(api_key, timeout)?,
            has_key: !api_key.is_empty(),
            model: model.to_string(),
            language,
        })
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<TranscriptSegment>> {
        self.check_ready()?;
        debug!("Transcribing audio file");

        let file_bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.m4a")
            .to_string();

        let mut request_builder = CreateTranscriptionRequestArgs::default();
        request_builder
            .file(AudioInput::from_vec_u8(file_name, file_bytes))
            .model(&self.model);

        if let Some(lang) = &self.language {
            request_builder.language(lang);
        }

        let request = request_builder.build().map_err(|e| {
            CheatsheetError::Transcription(format!("Failed to build request: {}", e))
        })?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| CheatsheetError::OpenAI(format!("Whisper API error: {}", e)))?;

        let text = response.text.trim();
        if text.is_empty() {
            debug!("Whisper returned no speech");
            return Ok(Vec::new());
        }

        Ok(vec![TranscriptSegment::new(text)])
    }

    fn check_ready(&self) -> Result<()> {
        if self.has_key {
            Ok(())
        } else {
            Err(CheatsheetError::OpenAIKeyMissing)
        }
    }
}
