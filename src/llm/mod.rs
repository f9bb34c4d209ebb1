//! Language model capability used by the generators.

mod chat;

pub use chat::ChatModel;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for text completion.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
