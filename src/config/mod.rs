//! Configuration module for yt-cheatsheet.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{InstructionPrompts, Prompts};
pub use settings::{
    CaptionSettings, ChunkingSettings, GeneralSettings, OpenAISettings, OutputSettings,
    PromptSettings, Settings, TranscriptionSettings, API_KEY_ENV,
};
