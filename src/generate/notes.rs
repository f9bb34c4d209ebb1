//! Notes: per-chunk summaries merged into one structured article, then PDF.

use super::{estimate_tokens, trim_to_token_budget};
use crate::chunking::ChunkSet;
use crate::config::Prompts;
use crate::error::{Result, StudyError};
use crate::llm::LanguageModel;
use crate::render::render_notes_pdf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The article text and its rendered PDF.
#[derive(Debug, Clone)]
pub struct NotesArtifact {
    pub article: String,
    pub pdf: Vec<u8>,
}

pub struct NotesGenerator {
    model: Arc<dyn LanguageModel>,
    prompts: Prompts,
    token_budget: usize,
}

impl NotesGenerator {
    pub fn new(model: Arc<dyn LanguageModel>, prompts: Prompts, token_budget: usize) -> Self {
        Self {
            model,
            prompts,
            token_budget,
        }
    }

    /// Summarize every chunk, then write the final article.
    #[instrument(skip(self, chunks), fields(chunks = chunks.len(), model = self.model.model()))]
    pub async fn write_article(&self, chunks: &ChunkSet) -> Result<String> {
        let mut summaries = Vec::new();

        for (idx, group) in chunks.groups().iter().enumerate() {
            let text = group.join(" ");
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let prompt = self
                .prompts
                .render_with_custom(&self.prompts.notes.chunk_summary, &[("text", text.to_string())]);
            match self.model.complete(&prompt).await {
                Ok(summary) => summaries.push(summary.trim().to_string()),
                Err(e) => warn!("Skipping chunk {} in notes: {}", idx, e),
            }
        }

        if summaries.is_empty() {
            return Err(StudyError::Generation(
                "no chunk could be summarized for notes".to_string(),
            ));
        }
        info!("Summarized {} of {} chunks", summaries.len(), chunks.len());

        let merged = summaries.join("\n");
        let bounded = trim_to_token_budget(&merged, self.token_budget);
        if bounded.len() < merged.len() {
            debug!(
                "Merged summaries cut from ~{} to ~{} tokens",
                estimate_tokens(&merged),
                estimate_tokens(bounded)
            );
        }

        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.notes.article, &[("text", bounded.to_string())]);
        let article = self.model.complete(&prompt).await?;
        let article = article.trim();
        if article.is_empty() {
            return Err(StudyError::Generation("empty notes article".to_string()));
        }

        Ok(article.to_string())
    }

    /// Write the article and render it to PDF.
    pub async fn generate(&self, chunks: &ChunkSet) -> Result<NotesArtifact> {
        let article = self.write_article(chunks).await?;
        let pdf = render_notes_pdf(&article)?;
        debug!("Rendered notes PDF ({} bytes)", pdf.len());
        Ok(NotesArtifact { article, pdf })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeModel;

    const ARTICLE: &str = "Title: Traits\nOverview:\nTraits describe shared behavior.\n- End of Document -";

    fn chunks(texts: &[&str]) -> ChunkSet {
        ChunkSet::new(texts.iter().map(|t| vec![t.to_string()]).collect())
    }

    fn is_article_prompt(prompt: &str) -> bool {
        prompt.contains("well-formatted article")
    }

    #[tokio::test]
    async fn test_summaries_feed_article() {
        let model = Arc::new(FakeModel::new(|prompt| {
            if is_article_prompt(prompt) {
                Ok(ARTICLE.to_string())
            } else if prompt.contains("alpha") {
                Ok("Summary A.".to_string())
            } else {
                Ok("Summary B.".to_string())
            }
        }));
        let generator = NotesGenerator::new(model.clone(), Prompts::default(), 5900);

        let artifact = generator
            .generate(&chunks(&["alpha text", "   ", "beta text", ""]))
            .await
            .unwrap();

        assert_eq!(artifact.article, ARTICLE);
        assert!(artifact.pdf.starts_with(b"%PDF"));

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[2].contains("Summary A.\nSummary B."));
    }

    #[tokio::test]
    async fn test_failed_chunk_is_omitted() {
        let model = Arc::new(FakeModel::new(|prompt| {
            if is_article_prompt(prompt) {
                Ok(ARTICLE.to_string())
            } else if prompt.contains("broken") {
                Err("timeout".to_string())
            } else {
                Ok("Kept summary.".to_string())
            }
        }));
        let generator = NotesGenerator::new(model.clone(), Prompts::default(), 5900);

        let article = generator
            .write_article(&chunks(&["broken chunk", "good chunk"]))
            .await
            .unwrap();
        assert_eq!(article, ARTICLE);

        let final_prompt = model.prompts().pop().unwrap();
        assert!(final_prompt.contains("Kept summary."));
    }

    #[tokio::test]
    async fn test_article_failure_propagates() {
        let model = Arc::new(FakeModel::scripted(vec![Ok("One."), Err("server error")]));
        let generator = NotesGenerator::new(model, Prompts::default(), 5900);

        let err = generator.write_article(&chunks(&["text"])).await.unwrap_err();
        assert!(matches!(err, StudyError::Generation(_)));
    }

    #[tokio::test]
    async fn test_no_summaries_is_an_error() {
        let model = Arc::new(FakeModel::new(|_| Err("down".to_string())));
        let generator = NotesGenerator::new(model.clone(), Prompts::default(), 5900);

        assert!(generator.write_article(&chunks(&["a", "b"])).await.is_err());
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn test_merged_summaries_respect_budget() {
        let long = "x".repeat(400);
        let model = Arc::new(FakeModel::new(move |prompt| {
            if is_article_prompt(prompt) {
                Ok(ARTICLE.to_string())
            } else {
                Ok(long.clone())
            }
        }));
        let generator = NotesGenerator::new(model.clone(), Prompts::default(), 50);

        generator.write_article(&chunks(&["a", "b"])).await.unwrap();

        let final_prompt = model.prompts().pop().unwrap();
        assert!(final_prompt.contains(&"x".repeat(200)));
        assert!(!final_prompt.contains(&"x".repeat(201)));
    }
}
