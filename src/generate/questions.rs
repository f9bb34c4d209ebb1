//! Multiple-choice question generation.

use crate::chunking::ChunkSet;
use crate::config::{Prompts, RemainderPolicy};
use crate::error::{Result, StudyError};
use crate::llm::LanguageModel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// One multiple-choice question as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl McqItem {
    /// Four options with the answer among them.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == 4 && self.options.contains(&self.answer)
    }
}

/// Slice out the outermost JSON array in a model response.
///
/// Models often wrap the array in a code fence or a sentence of prose.
pub fn extract_json_array(response: &str) -> Result<&str> {
    let start = response.find('[');
    let end = response.rfind(']');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&response[start..=end]),
        _ => Err(StudyError::MalformedResponse(format!(
            "no JSON array in response: {}",
            response.chars().take(120).collect::<String>()
        ))),
    }
}

fn parse_items(response: &str) -> Result<Vec<McqItem>> {
    let json = extract_json_array(response)?;
    serde_json::from_str(json)
        .map_err(|e| StudyError::MalformedResponse(format!("invalid question list: {}", e)))
}

/// Generates a fixed number of questions spread across the chunks.
pub struct QuestionSetGenerator {
    model: Arc<dyn LanguageModel>,
    prompts: Prompts,
    remainder: RemainderPolicy,
}

impl QuestionSetGenerator {
    pub fn new(model: Arc<dyn LanguageModel>, prompts: Prompts, remainder: RemainderPolicy) -> Self {
        Self {
            model,
            prompts,
            remainder,
        }
    }

    /// Generate exactly `total` questions at `difficulty`.
    ///
    /// Every chunk is asked for `total / chunks` questions. Whatever is still
    /// missing afterwards is requested once more according to the remainder
    /// policy, and the result is cut to `total`.
    #[instrument(skip(self, chunks), fields(chunks = chunks.len(), model = self.model.model()))]
    pub async fn generate(
        &self,
        chunks: &ChunkSet,
        total: usize,
        difficulty: &str,
    ) -> Result<Vec<McqItem>> {
        if total == 0 {
            return Err(StudyError::InvalidInput(
                "number of questions must be at least 1".to_string(),
            ));
        }

        let texts = chunks.texts();
        let usable: Vec<usize> = (0..texts.len())
            .filter(|&i| !texts[i].trim().is_empty())
            .collect();
        if usable.is_empty() {
            return Err(StudyError::InvalidInput(
                "no transcript text to generate questions from".to_string(),
            ));
        }

        let per_chunk = total / texts.len();
        let mut questions = Vec::with_capacity(total);

        if per_chunk > 0 {
            for (idx, text) in texts.iter().enumerate() {
                if text.trim().is_empty() {
                    debug!("Skipping empty chunk {}", idx);
                    continue;
                }
                questions.extend(self.request(text, per_chunk, difficulty).await?);
            }
        }
        debug!("Main pass produced {} questions", questions.len());

        if questions.len() < total {
            let shortfall = total - questions.len();
            for (idx, count) in self.distribute(shortfall, &usable) {
                info!("Requesting {} more questions from chunk {}", count, idx);
                questions.extend(self.request(&texts[idx], count, difficulty).await?);
            }
        }

        questions.truncate(total);
        Ok(questions)
    }

    /// Shortfall requests as `(chunk index, count)` pairs.
    fn distribute(&self, shortfall: usize, usable: &[usize]) -> Vec<(usize, usize)> {
        match self.remainder {
            RemainderPolicy::FirstChunk => vec![(usable[0], shortfall)],
            RemainderPolicy::RoundRobin => {
                let base = shortfall / usable.len();
                let extra = shortfall % usable.len();
                usable
                    .iter()
                    .enumerate()
                    .map(|(pos, &idx)| (idx, base + usize::from(pos < extra)))
                    .filter(|&(_, count)| count > 0)
                    .collect()
            }
        }
    }

    async fn request(&self, text: &str, count: usize, difficulty: &str) -> Result<Vec<McqItem>> {
        let prompt = self.prompts.render_with_custom(
            &self.prompts.questions.generate,
            &[
                ("num", count.to_string()),
                ("difficulty", difficulty.to_string()),
                ("text", text.to_string()),
            ],
        );

        let response = self.model.complete(&prompt).await?;
        let items = parse_items(&response)?;

        for item in items.iter().filter(|item| !item.is_well_formed()) {
            debug!("Keeping malformed question: {:?}", item.question);
        }
        if items.len() != count {
            debug!("Asked for {} questions, got {}", count, items.len());
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mcq_json, requested_count, FakeModel};

    fn chunk_set(n: usize) -> ChunkSet {
        ChunkSet::new(
            (0..n)
                .map(|i| vec![format!("chunk {} text about lifetimes", i)])
                .collect(),
        )
    }

    fn obedient_model() -> Arc<FakeModel> {
        Arc::new(FakeModel::new(|prompt| Ok(mcq_json(requested_count(prompt), "q"))))
    }

    fn generator(model: Arc<FakeModel>, remainder: RemainderPolicy) -> QuestionSetGenerator {
        QuestionSetGenerator::new(model, Prompts::default(), remainder)
    }

    #[tokio::test]
    async fn test_ten_questions_over_seven_chunks() {
        let model = obedient_model();
        let questions = generator(model.clone(), RemainderPolicy::FirstChunk)
            .generate(&chunk_set(7), 10, "easy")
            .await
            .unwrap();

        assert_eq!(questions.len(), 10);
        let counts: Vec<usize> = model.prompts().iter().map(|p| requested_count(p)).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 1, 1, 1, 3]);
        assert!(model.prompts()[7].contains("chunk 0 text"));
        assert!(model.prompts()[0].contains("Difficulty Level => easy"));
    }

    #[tokio::test]
    async fn test_fewer_questions_than_chunks() {
        let model = obedient_model();
        let questions = generator(model.clone(), RemainderPolicy::FirstChunk)
            .generate(&chunk_set(5), 3, "medium")
            .await
            .unwrap();

        assert_eq!(questions.len(), 3);
        assert_eq!(model.calls(), 1);
        assert_eq!(requested_count(&model.prompts()[0]), 3);
    }

    #[tokio::test]
    async fn test_exact_count_for_many_totals() {
        for chunks in 5..=9 {
            for total in [1, 4, 9, 10, 17, 25] {
                let questions = generator(obedient_model(), RemainderPolicy::FirstChunk)
                    .generate(&chunk_set(chunks), total, "hard")
                    .await
                    .unwrap();
                assert_eq!(questions.len(), total, "chunks={} total={}", chunks, total);
            }
        }
    }

    #[tokio::test]
    async fn test_round_robin_spreads_shortfall() {
        let model = obedient_model();
        let questions = generator(model.clone(), RemainderPolicy::RoundRobin)
            .generate(&chunk_set(7), 10, "medium")
            .await
            .unwrap();

        assert_eq!(questions.len(), 10);
        let extra: Vec<usize> = model.prompts()[7..].iter().map(|p| requested_count(p)).collect();
        assert_eq!(extra, vec![1, 1, 1]);
        assert!(model.prompts()[9].contains("chunk 2 text"));
    }

    #[tokio::test]
    async fn test_overproduction_is_truncated() {
        let model = Arc::new(FakeModel::new(|_| Ok(mcq_json(4, "many"))));
        let questions = generator(model, RemainderPolicy::FirstChunk)
            .generate(&chunk_set(5), 6, "medium")
            .await
            .unwrap();
        assert_eq!(questions.len(), 6);
    }

    #[tokio::test]
    async fn test_padding_chunks_are_not_sent() {
        let chunks = ChunkSet::new(vec![
            vec!["real content".to_string()],
            vec![String::new()],
            vec![String::new()],
            vec![String::new()],
            vec![String::new()],
        ]);
        let model = obedient_model();
        let questions = generator(model.clone(), RemainderPolicy::FirstChunk)
            .generate(&chunks, 5, "medium")
            .await
            .unwrap();

        assert_eq!(questions.len(), 5);
        assert!(model.prompts().iter().all(|p| p.contains("real content")));
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = Arc::new(FakeModel::new(|_| Err("rate limited".to_string())));
        let err = generator(model, RemainderPolicy::FirstChunk)
            .generate(&chunk_set(5), 5, "medium")
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::Generation(_)));
    }

    #[tokio::test]
    async fn test_zero_questions_rejected() {
        let err = generator(obedient_model(), RemainderPolicy::FirstChunk)
            .generate(&chunk_set(5), 0, "medium")
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::InvalidInput(_)));
    }

    #[test]
    fn test_extract_json_array_from_fenced_response() {
        let response = "Here you go:\n```json\n[{\"question\": \"Q?\", \"options\": [\"a\",\"b\",\"c\",\"d\"], \"answer\": \"a\"}]\n```";
        let items = parse_items(response).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_well_formed());
    }

    #[test]
    fn test_malformed_responses() {
        assert!(matches!(
            extract_json_array("no list here").unwrap_err(),
            StudyError::MalformedResponse(_)
        ));
        assert!(matches!(
            parse_items("[not json]").unwrap_err(),
            StudyError::MalformedResponse(_)
        ));
        assert!(extract_json_array("] backwards [").is_err());
    }

    #[test]
    fn test_answer_outside_options_is_kept() {
        let items = parse_items(
            r#"[{"question": "Q?", "options": ["a", "b", "c"], "answer": "z"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert!(!items[0].is_well_formed());
    }
}
