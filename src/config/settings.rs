//! Configuration settings for tubestudy.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub transcript: TranscriptSettings,
    pub chunking: ChunkingSettings,
    pub questions: QuestionSettings,
    pub notes: NotesSettings,
    pub voice: VoiceSettings,
    pub tts: TtsSettings,
    pub server: ServerSettings,
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

/// LLM provider settings. Any OpenAI-compatible endpoint works.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Base URL of the chat completions API.
    pub api_base: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Model used for multiple-choice questions.
    pub question_model: String,
    /// Model used for notes summaries and the final article.
    pub notes_model: String,
    /// Model used for spoken summaries and the narration script.
    pub voice_model: String,
    /// Sampling temperature. Provider default when unset.
    pub temperature: Option<f32>,
    /// Request timeout in seconds. HTTP client default when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            question_model: "llama-3.1-8b-instant".to_string(),
            notes_model: "llama3-70b-8192".to_string(),
            voice_model: "llama-3.1-8b-instant".to_string(),
            temperature: None,
            request_timeout_secs: None,
        }
    }
}

/// Transcript retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Preferred transcript language code.
    pub language: String,
    /// Words trimmed from each end of the transcript.
    pub edge_words: usize,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            edge_words: 100,
        }
    }
}

/// Text splitting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum size of a splitter unit, in characters.
    pub unit_size: usize,
    /// Overlap carried between consecutive units, in characters.
    pub unit_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            unit_size: 800,
            unit_overlap: 100,
        }
    }
}

/// Where leftover questions are requested from when the total does not
/// divide evenly across chunks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// One extra request against the first chunk.
    #[default]
    FirstChunk,
    /// Spread the shortfall one question at a time across chunks.
    RoundRobin,
}

impl std::str::FromStr for RemainderPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "first_chunk" | "first" => Ok(RemainderPolicy::FirstChunk),
            "round_robin" => Ok(RemainderPolicy::RoundRobin),
            _ => Err(format!("Unknown remainder policy: {}", s)),
        }
    }
}

impl std::fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemainderPolicy::FirstChunk => write!(f, "first_chunk"),
            RemainderPolicy::RoundRobin => write!(f, "round_robin"),
        }
    }
}

/// Question generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionSettings {
    pub default_count: usize,
    pub default_difficulty: String,
    pub remainder: RemainderPolicy,
}

impl Default for QuestionSettings {
    fn default() -> Self {
        Self {
            default_count: 10,
            default_difficulty: "medium".to_string(),
            remainder: RemainderPolicy::FirstChunk,
        }
    }
}

/// Notes generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesSettings {
    /// Token budget for the merged summaries (estimated at 4 characters per token).
    pub token_budget: usize,
}

impl Default for NotesSettings {
    fn default() -> Self {
        Self { token_budget: 5900 }
    }
}

/// Narration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Character budget for the merged spoken summaries.
    pub char_budget: usize,
    pub language_code: String,
    pub voice_name: String,
    pub gender: String,
    pub encoding: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            char_budget: 5900,
            language_code: "en-US".to_string(),
            voice_name: "en-US-Wavenet-D".to_string(),
            gender: "MALE".to_string(),
            encoding: "MP3".to_string(),
        }
    }
}

/// Text-to-speech provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsSettings {
    /// Environment variable holding the service-account file path.
    pub credentials_env: String,
    /// Service-account file used when the environment variable is unset.
    pub default_credentials_path: String,
    /// Synthesis endpoint.
    pub endpoint: String,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            credentials_env: "GOOGLE_APPLICATION_CREDENTIALS".to_string(),
            default_credentials_path: "gcloud-key.json".to_string(),
            endpoint: "https://texttospeech.googleapis.com/v1/text:synthesize".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
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
            .join("tubestudy")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
