//! Pipeline orchestrator for yt-cheatsheet.
//!
//! Coordinates the whole run: metadata, transcript, chunking, generation and rendering.

use crate::audio::YtDlpAudio;
use crate::captions::YoutubeCaptions;
use crate::chunking::{split_transcript, TextSplitter, TokenSplitter};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::output::render;
use crate::summarize::{Artifact, OpenAIChat, Summarizer};
use crate::transcription::{TranscriptAcquirer, WhisperTranscriber};
use crate::video::{VideoResolver, YtDlpResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Which sections to include in the cheatsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub takeaways: bool,
    pub summary: bool,
    pub metadata: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            takeaways: true,
            summary: true,
            metadata: true,
        }
    }
}

impl RunOptions {
    fn needs_transcript(&self) -> bool {
        self.takeaways || self.summary
    }
}

/// A rendered cheatsheet, ready to print or write.
#[derive(Debug, Clone, PartialEq)]
pub struct CheatsheetDocument {
    pub title: String,
    pub content: String,
}

/// The main orchestrator for the cheatsheet pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    resolver: Arc<dyn VideoResolver>,
    acquirer: TranscriptAcquirer,
    splitter: Arc<dyn TextSplitter>,
    summarizer: Summarizer,
}

impl Orchestrator {
    /// Create an orchestrator backed by yt-dlp, YouTube captions, Whisper and OpenAI chat.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        // Resolved once; a missing key surfaces on first use, before any request.
        let api_key = settings.api_key();
        let timeout = Duration::from_secs(settings.openai.timeout_seconds);

        let transcriber = Arc::new(WhisperTranscriber::with_config(
            api_key.as_deref(),
            &settings.transcription.model,
            settings.transcription.language.clone(),
            timeout,
        )?);
        let acquirer = TranscriptAcquirer::new(
            Arc::new(YoutubeCaptions::new(settings.captions.languages.clone())?),
            Arc::new(YtDlpAudio::new()),
            transcriber,
        );

        let chat = Arc::new(OpenAIChat::new(
            api_key.as_deref().unwrap_or_default(),
            timeout,
        )?);
        let summarizer = Summarizer::new(chat, settings.openai.model.clone(), api_key);

        info!(
            "Using {} for generation, {} for transcription",
            settings.openai.model, settings.transcription.model
        );

        Ok(Self {
            splitter: Arc::new(TokenSplitter::with_max_tokens(settings.chunking.max_tokens)?),
            resolver: Arc::new(YtDlpResolver::new()),
            settings,
            prompts,
            acquirer,
            summarizer,
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        resolver: Arc<dyn VideoResolver>,
        acquirer: TranscriptAcquirer,
        splitter: Arc<dyn TextSplitter>,
        summarizer: Summarizer,
    ) -> Self {
        Self {
            settings,
            prompts,
            resolver,
            acquirer,
            splitter,
            summarizer,
        }
    }

    /// Build the cheatsheet for a video URL.
    ///
    /// Takeaways are generated before the summary; the rendered document still
    /// lists the summary first.
    #[instrument(skip(self, options), fields(url = %url))]
    pub async fn run(&self, url: &str, options: &RunOptions) -> Result<CheatsheetDocument> {
        info!("Fetching metadata");
        let video = self.resolver.resolve(url).await?;
        info!("Resolved '{}' by {}", video.title, video.author);

        let mut takeaways = None;
        let mut summary = None;

        if options.needs_transcript() {
            let transcript = self.acquirer.acquire(&video).await?;
            let chunks = split_transcript(self.splitter.as_ref(), &transcript.text)?;
            info!(
                "Transcript ({:?}) split into {} chunk(s)",
                transcript.origin,
                chunks.len()
            );

            let temperature = self.settings.openai.temperature;
            if options.takeaways {
                takeaways = Some(
                    self.summarizer
                        .generate(Artifact::Takeaways, &self.prompts, &video.title, &chunks, temperature)
                        .await?,
                );
            }
            if options.summary {
                summary = Some(
                    self.summarizer
                        .generate(Artifact::Summary, &self.prompts, &video.title, &chunks, temperature)
                        .await?,
                );
            }
        }

        let metadata = options.metadata.then(|| video.metadata_string());
        let content = render(
            &video.title,
            metadata.as_deref(),
            takeaways.as_deref(),
            summary.as_deref(),
        );

        Ok(CheatsheetDocument {
            title: video.title,
            content,
        })
    }
}
