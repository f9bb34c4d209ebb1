//! Configuration module for tubestudy.
//!
//! Handles loading application settings, prompt templates, and provider credentials.

mod credentials;
mod prompts;
mod settings;

pub use credentials::Credentials;
pub use prompts::{NotesPrompts, Prompts, QuestionPrompts, VoicePrompts};
pub use settings::{
    ChunkingSettings, GeneralSettings, LlmSettings, NotesSettings, PromptSettings,
    QuestionSettings, RemainderPolicy, ServerSettings, Settings, TranscriptSettings, TtsSettings,
    VoiceSettings,
};
