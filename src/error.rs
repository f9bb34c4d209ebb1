//! Error types for tubestudy.

use thiserror::Error;

/// Library-level error type for tubestudy operations.
#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Invalid YouTube video ID: {0}")]
    InvalidIdentifier(String),

    #[error("Transcript unavailable for {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Transcript for {video_id} is too short to trim ({words} words)")]
    TranscriptTooShort { video_id: String, words: usize },

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Summary script generation failed")]
    ScriptGenerationFailed,

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl StudyError {
    /// Whether the error came from an upstream generation or speech service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            StudyError::Generation(_)
                | StudyError::MalformedResponse(_)
                | StudyError::ScriptGenerationFailed
                | StudyError::Speech(_)
                | StudyError::Http(_)
        )
    }
}

/// Result type alias for tubestudy operations.
pub type Result<T> = std::result::Result<T, StudyError>;
