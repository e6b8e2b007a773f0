//! Streaming chat completions via the OpenAI API.

use super::{ChatProvider, ChatRequest};
use crate::error::{CheatsheetError, Result};
use crate::openai::create_client_with_timeout;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, instrument};

/// Chat provider that streams a completion and joins the content fragments.
pub struct OpenAIChat {
    client: Client<OpenAIConfig>,
}

impl OpenAIChat {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(api_key, timeout)?,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAIChat {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(|e| CheatsheetError::OpenAI(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.clone())
                .build()
                .map_err(|e| CheatsheetError::OpenAI(e.to_string()))?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .stream(true)
            .build()
            .map_err(|e| CheatsheetError::OpenAI(e.to_string()))?;

        let mut stream = self
            .client
            .chat()
            .create_stream(chat_request)
            .await
            .map_err(|e| CheatsheetError::OpenAI(format!("Failed to start completion: {}", e)))?;

        let mut content = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| CheatsheetError::OpenAI(format!("Completion stream failed: {}", e)))?;

            for choice in &chunk.choices {
                if let Some(fragment) = &choice.delta.content {
                    content.push_str(fragment);
                }
            }
        }

        debug!("Received {} characters", content.len());
        Ok(content)
    }
}
