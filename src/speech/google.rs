//! Google Cloud Text-to-Speech over REST with a service-account key.

use super::{SpeechSynthesizer, VoiceConfig};
use crate::error::{Result, StudyError};
use async_trait::async_trait;
use base64::Engine;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

const SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a service-account JSON key that token exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Read a key file. A missing file is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StudyError::Config(format!(
                "Cannot read TTS credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            StudyError::Config(format!(
                "Invalid TTS credentials file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Build a signed RS256 assertion for the token endpoint.
    fn assertion(&self, now: i64) -> Result<String> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| StudyError::Config(format!("Invalid service-account private key: {}", e)))?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| StudyError::Speech(format!("Failed to sign token assertion: {}", e)))
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig<'a>,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
}

impl<'a> SynthesizeRequest<'a> {
    fn new(text: &'a str, voice: &'a VoiceConfig) -> Self {
        Self {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &voice.language_code,
                name: &voice.name,
                ssml_gender: &voice.gender,
            },
            audio_config: AudioConfig {
                audio_encoding: &voice.encoding,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Google Cloud TTS client. The key file is read on first use.
pub struct GoogleSpeech {
    http: reqwest::Client,
    endpoint: String,
    credentials_path: PathBuf,
    key: OnceCell<ServiceAccountKey>,
}

impl GoogleSpeech {
    pub fn new(endpoint: &str, credentials_path: PathBuf) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            credentials_path,
            key: OnceCell::new(),
        }
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    async fn key(&self) -> Result<&ServiceAccountKey> {
        self.key
            .get_or_try_init(|| async {
                info!("Loading TTS credentials from {}", self.credentials_path.display());
                ServiceAccountKey::load(&self.credentials_path)
            })
            .await
    }

    async fn access_token(&self) -> Result<String> {
        let key = self.key().await?;
        let assertion = key.assertion(chrono::Utc::now().timestamp())?;

        let response = self
            .http
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StudyError::Speech(format!(
                "Token exchange failed ({}): {}",
                status, body
            )));
        }

        Ok(response.json::<TokenResponse>().await?.access_token)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    #[instrument(skip(self, text), fields(chars = text.len(), voice = %voice.name))]
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&SynthesizeRequest::new(text, voice))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StudyError::Speech(format!(
                "Synthesis failed ({}): {}",
                status, body
            )));
        }

        let body: SynthesizeResponse = response.json().await?;
        let audio = base64::engine::general_purpose::STANDARD
            .decode(body.audio_content.as_bytes())
            .map_err(|e| StudyError::Speech(format!("Invalid audio payload: {}", e)))?;

        debug!("Synthesized {} bytes of audio", audio.len());
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let voice = VoiceConfig::default();
        let body = serde_json::to_value(SynthesizeRequest::new("Hello there", &voice)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "input": { "text": "Hello there" },
                "voice": { "languageCode": "en-US", "name": "en-US-Wavenet-D", "ssmlGender": "MALE" },
                "audioConfig": { "audioEncoding": "MP3" }
            })
        );
    }

    #[test]
    fn test_load_key_defaults_token_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(
            &path,
            r#"{"type": "service_account", "client_email": "tts@example.iam.gserviceaccount.com", "private_key": "pem"}"#,
        )
        .unwrap();

        let key = ServiceAccountKey::load(&path).unwrap();
        assert_eq!(key.client_email, "tts@example.iam.gserviceaccount.com");
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn test_missing_key_file_is_config_error() {
        let err = ServiceAccountKey::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, StudyError::Config(_)));
    }

    #[test]
    fn test_bad_private_key_is_config_error() {
        let key = ServiceAccountKey {
            client_email: "tts@example.com".to_string(),
            private_key: "not a pem".to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
        };
        assert!(matches!(key.assertion(0).unwrap_err(), StudyError::Config(_)));
    }

    #[tokio::test]
    async fn test_synthesize_without_key_file_fails_at_first_use() {
        let speech = GoogleSpeech::new("http://127.0.0.1:9/synthesize", PathBuf::from("/no/such/key.json"));
        let err = speech.synthesize("hi", &VoiceConfig::default()).await.unwrap_err();
        assert!(matches!(err, StudyError::Config(_)));
    }
}
