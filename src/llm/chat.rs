//! Chat-completions implementation of [`LanguageModel`].

use super::LanguageModel;
use crate::config::{Credentials, LlmSettings};
use crate::error::{Result, StudyError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// A single model on an OpenAI-compatible chat endpoint.
pub struct ChatModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatModel {
    pub fn new(settings: &LlmSettings, credentials: &Credentials, model: &str) -> Result<Self> {
        Ok(Self {
            client: create_client(settings, credentials)?,
            model: model.to_string(),
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl LanguageModel for ChatModel {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| StudyError::Generation(e.to_string()))?
                .into(),
        ];

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&self.model).messages(messages);
        if let Some(temperature) = self.temperature {
            builder.temperature(temperature);
        }
        let request = builder
            .build()
            .map_err(|e| StudyError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| StudyError::Generation(format!("{} API error: {}", self.model, e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| StudyError::Generation("Empty response from LLM".to_string()))?;

        debug!("LLM response: {}", preview(content, 300));
        Ok(content.trim().to_string())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
