//! Text-to-speech capability.

mod google;

pub use google::{GoogleSpeech, ServiceAccountKey};

use crate::config::VoiceSettings;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Voice selection and output encoding for synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// BCP-47 locale, e.g. "en-US".
    pub language_code: String,
    /// Provider voice name.
    pub name: String,
    /// Gender marker ("MALE", "FEMALE", "NEUTRAL").
    pub gender: String,
    /// Audio encoding ("MP3").
    pub encoding: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            name: "en-US-Wavenet-D".to_string(),
            gender: "MALE".to_string(),
            encoding: "MP3".to_string(),
        }
    }
}

impl From<&VoiceSettings> for VoiceConfig {
    fn from(settings: &VoiceSettings) -> Self {
        Self {
            language_code: settings.language_code.clone(),
            name: settings.voice_name.clone(),
            gender: settings.gender.to_uppercase(),
            encoding: settings.encoding.to_uppercase(),
        }
    }
}

/// Trait for speech synthesis services.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and return the encoded audio bytes.
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_from_settings_matches_default() {
        let voice = VoiceConfig::from(&VoiceSettings::default());
        assert_eq!(voice, VoiceConfig::default());
    }
}
