//! Narrated summary: spoken per-chunk summaries merged into a short script.

use super::truncate_chars;
use crate::chunking::ChunkSet;
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::speech::{SpeechSynthesizer, VoiceConfig};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// The narration script and its synthesized audio.
#[derive(Debug, Clone)]
pub struct VoiceArtifact {
    pub script: String,
    pub audio: Vec<u8>,
}

pub struct VoiceSummaryGenerator {
    model: Arc<dyn LanguageModel>,
    speech: Arc<dyn SpeechSynthesizer>,
    prompts: Prompts,
    voice: VoiceConfig,
    char_budget: usize,
}

impl VoiceSummaryGenerator {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        speech: Arc<dyn SpeechSynthesizer>,
        prompts: Prompts,
        voice: VoiceConfig,
        char_budget: usize,
    ) -> Self {
        Self {
            model,
            speech,
            prompts,
            voice,
            char_budget,
        }
    }

    /// Build the narration script. `None` when no script could be produced.
    ///
    /// A chunk whose summary fails is left out; only the final script
    /// request decides the outcome.
    #[instrument(skip(self, chunks), fields(chunks = chunks.len(), model = self.model.model()))]
    pub async fn generate_script(&self, chunks: &ChunkSet) -> Option<String> {
        let mut summaries = Vec::new();

        for (idx, segment) in chunks.flatten().into_iter().enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let prompt = self
                .prompts
                .render_with_custom(&self.prompts.voice.chunk_summary, &[("text", segment.to_string())]);
            match self.model.complete(&prompt).await {
                Ok(summary) => summaries.push(summary.trim().to_string()),
                Err(e) => warn!("Failed to summarize segment {} for narration: {}", idx, e),
            }
        }

        if summaries.is_empty() {
            warn!("No segment summaries to build a narration from");
            return None;
        }
        debug!("Collected {} spoken summaries", summaries.len());

        let merged = summaries.join("\n");
        let bounded = truncate_chars(&merged, self.char_budget);

        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.voice.script, &[("text", bounded.to_string())]);
        match self.model.complete(&prompt).await {
            Ok(script) if !script.trim().is_empty() => {
                let script = script.trim().to_string();
                info!("Narration script ready ({} words)", script.split_whitespace().count());
                Some(script)
            }
            Ok(_) => {
                error!("Narration script came back empty");
                None
            }
            Err(e) => {
                error!("Failed to generate narration script: {}", e);
                None
            }
        }
    }

    /// Synthesize `script` with the configured voice.
    pub async fn synthesize(&self, script: &str) -> Result<Vec<u8>> {
        self.speech.synthesize(script, &self.voice).await
    }
}
