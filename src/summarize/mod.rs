//! Chunked summarization through a chat-completion provider.
//!
//! Every chunk is sent in order with the same system instruction; the streamed
//! replies are concatenated in chunk order to form one [`Artifact`] text.

mod openai;

pub use openai::OpenAIChat;

use crate::config::Prompts;
use crate::error::{CheatsheetError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A single chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    /// System instruction.
    pub system: String,
    /// User content (one transcript chunk).
    pub user: String,
}

/// Trait for chat-completion providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one request and return the full reply, with streamed fragments joined.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// The generated sections of a cheatsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Bulleted key-takeaways list.
    Takeaways,
    /// Markdown blog-post rendering of the transcript.
    Summary,
}

impl Artifact {
    /// System instruction for this artifact, headed by the video title.
    pub fn instruction(&self, prompts: &Prompts, title: &str) -> String {
        match self {
            Artifact::Takeaways => prompts.takeaways_instruction(title),
            Artifact::Summary => prompts.summary_instruction(title),
        }
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Artifact::Takeaways => write!(f, "takeaways"),
            Artifact::Summary => write!(f, "summary"),
        }
    }
}

/// Runs a system instruction over every transcript chunk.
pub struct Summarizer {
    provider: Arc<dyn ChatProvider>,
    model: String,
    api_key: Option<String>,
}

impl Summarizer {
    /// Create a summarizer. The credential is checked on every call, before any request.
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key,
        }
    }

    fn validate(&self, instruction: &str) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(CheatsheetError::InvalidModel);
        }
        if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(CheatsheetError::OpenAIKeyMissing);
        }
        if instruction.trim().is_empty() {
            return Err(CheatsheetError::InvalidSystemMessage);
        }
        Ok(())
    }

    /// Send `instruction` with each chunk and concatenate the replies in chunk order.
    #[instrument(skip(self, chunks, instruction), fields(chunk_count = chunks.len(), model = %self.model))]
    pub async fn summarize(
        &self,
        chunks: &[String],
        instruction: &str,
        temperature: f32,
    ) -> Result<String> {
        self.validate(instruction)?;

        let mut result = String::new();
        for (index, chunk) in chunks.iter().enumerate() {
            debug!("Requesting completion for chunk {}/{}", index + 1, chunks.len());

            let request = ChatRequest {
                model: self.model.clone(),
                temperature,
                system: instruction.to_string(),
                user: chunk.clone(),
            };
            result.push_str(&self.provider.complete(&request).await?);
        }

        Ok(result)
    }

    /// Generate one artifact for the given video title.
    pub async fn generate(
        &self,
        artifact: Artifact,
        prompts: &Prompts,
        title: &str,
        chunks: &[String],
        temperature: f32,
    ) -> Result<String> {
        info!("Generating {}", artifact);
        let instruction = artifact.instruction(prompts, title);
        self.summarize(chunks, &instruction, temperature).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replies "<reply n>" to the n-th request and records every request.
    #[derive(Default)]
    struct RecordingProvider {
        pub requests: Mutex<Vec<ChatRequest>>,
    }

    impl RecordingProvider {
        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatProvider for RecordingProvider {
        async fn complete(&self, request: &ChatRequest) -> Result<String> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            Ok(format!("<reply {}>", requests.len()))
        }
    }

    fn summarizer(api_key: Option<&str>) -> (Summarizer, Arc<RecordingProvider>) {
        let provider = Arc::new(RecordingProvider::default());
        let summarizer =
            Summarizer::new(provider.clone(), "gpt-4o-mini", api_key.map(str::to_string));
        (summarizer, provider)
    }

    fn chunks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_single_chunk_single_request() {
        let (summarizer, provider) = summarizer(Some("sk-test"));

        let result = summarizer
            .summarize(&chunks(&["only chunk"]), "Summarize.", 0.5)
            .await
            .unwrap();

        assert_eq!(result, "<reply 1>");
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, "Summarize.");
        assert_eq!(requests[0].user, "only chunk");
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(requests[0].temperature, 0.5);
    }

    #[tokio::test]
    async fn test_chunks_requested_and_joined_in_order() {
        let (summarizer, provider) = summarizer(Some("sk-test"));

        let result = summarizer
            .summarize(&chunks(&["a", "b", "c"]), "Summarize.", 1.0)
            .await
            .unwrap();

        assert_eq!(result, "<reply 1><reply 2><reply 3>");
        let users: Vec<String> = provider
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.user.clone())
            .collect();
        assert_eq!(users, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        for key in [None, Some(""), Some("   ")] {
            let (summarizer, provider) = summarizer(key);
            let err = summarizer
                .summarize(&chunks(&["a"]), "Summarize.", 1.0)
                .await
                .unwrap_err();

            assert!(matches!(err, CheatsheetError::OpenAIKeyMissing));
            assert_eq!(provider.request_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_invalid_inputs_rejected() {
        let (summarizer, _) = summarizer(Some("sk-test"));
        let err = summarizer.summarize(&chunks(&["a"]), "", 1.0).await.unwrap_err();
        assert!(matches!(err, CheatsheetError::InvalidSystemMessage));

        let provider = Arc::new(RecordingProvider::default());
        let no_model = Summarizer::new(provider.clone(), "", Some("sk-test".to_string()));
        let err = no_model.summarize(&chunks(&["a"]), "Summarize.", 1.0).await.unwrap_err();
        assert!(matches!(err, CheatsheetError::InvalidModel));
        assert_eq!(provider.request_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_uses_artifact_instruction() {
        let (summarizer, provider) = summarizer(Some("sk-test"));
        let prompts = Prompts::default();

        summarizer
            .generate(Artifact::Takeaways, &prompts, "My Video", &chunks(&["a"]), 1.0)
            .await
            .unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].system, prompts.takeaways_instruction("My Video"));
    }
}
