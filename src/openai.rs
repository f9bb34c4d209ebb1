//! OpenAI-compatible client construction.

use crate::config::{Credentials, LlmSettings};
use crate::error::{Result, StudyError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a chat client for the configured OpenAI-compatible endpoint.
///
/// No timeout is set unless `request_timeout_secs` is configured.
pub fn create_client(settings: &LlmSettings, credentials: &Credentials) -> Result<Client<OpenAIConfig>> {
    let config = OpenAIConfig::new()
        .with_api_base(settings.api_base.trim_end_matches('/'))
        .with_api_key(credentials.llm_api_key.clone());

    let mut builder = reqwest::Client::builder();
    if let Some(secs) = settings.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http_client = builder
        .build()
        .map_err(|e| StudyError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(config).with_http_client(http_client))
}
