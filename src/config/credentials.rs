//! Process-wide API credentials, resolved once at startup.

use super::Settings;
use crate::error::{Result, StudyError};
use std::path::PathBuf;

/// Credentials for the LLM and TTS providers.
///
/// Built once from the environment and handed to client constructors.
#[derive(Clone)]
pub struct Credentials {
    pub llm_api_key: String,
    pub tts_credentials_path: PathBuf,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("llm_api_key", &"<redacted>")
            .field("tts_credentials_path", &self.tts_credentials_path)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env(settings: &Settings) -> Result<Self> {
        Self::from_lookup(settings, |name| std::env::var(name).ok())
    }

    /// Resolve credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(settings: &Settings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_env = &settings.llm.api_key_env;
        let llm_api_key = match lookup(key_env) {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            Some(_) => {
                return Err(StudyError::Config(format!(
                    "{} is empty. Set it with: export {}='...'",
                    key_env, key_env
                )))
            }
            None => {
                return Err(StudyError::Config(format!(
                    "{} not set. Set it with: export {}='...'",
                    key_env, key_env
                )))
            }
        };

        let tts_path = lookup(&settings.tts.credentials_env)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| settings.tts.default_credentials_path.clone());

        Ok(Self {
            llm_api_key,
            tts_credentials_path: Settings::expand_path(&tts_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let err = Credentials::from_lookup(&Settings::default(), lookup_from(&[])).unwrap_err();
        assert!(matches!(err, StudyError::Config(_)));
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = Credentials::from_lookup(
            &Settings::default(),
            lookup_from(&[("GROQ_API_KEY", "  ")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_default_credentials_path() {
        let creds = Credentials::from_lookup(
            &Settings::default(),
            lookup_from(&[("GROQ_API_KEY", "gsk-test")]),
        )
        .unwrap();
        assert_eq!(creds.llm_api_key, "gsk-test");
        assert_eq!(creds.tts_credentials_path, PathBuf::from("gcloud-key.json"));
    }

    #[test]
    fn test_credentials_path_from_env() {
        let creds = Credentials::from_lookup(
            &Settings::default(),
            lookup_from(&[
                ("GROQ_API_KEY", "gsk-test"),
                ("GOOGLE_APPLICATION_CREDENTIALS", "/etc/keys/tts.json"),
            ]),
        )
        .unwrap();
        assert_eq!(creds.tts_credentials_path, PathBuf::from("/etc/keys/tts.json"));
        assert!(!format!("{:?}", creds).contains("gsk-test"));
    }
}
