//! Artifact generators built on the [`LanguageModel`](crate::llm::LanguageModel)
//! and [`SpeechSynthesizer`](crate::speech::SpeechSynthesizer) capabilities.

mod notes;
mod questions;
mod voice;

pub use notes::{NotesArtifact, NotesGenerator};
pub use questions::{extract_json_array, McqItem, QuestionSetGenerator};
pub use voice::{VoiceArtifact, VoiceSummaryGenerator};

/// Rough token estimate: four characters per token.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Cut `text` to about `budget` tokens when the estimate exceeds it.
pub fn trim_to_token_budget(text: &str, budget: usize) -> &str {
    if estimate_tokens(text) > budget {
        truncate_chars(text, budget * 4)
    } else {
        text
    }
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_is_char_safe() {
        assert_eq!(truncate_chars("naïve", 3), "naï");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_token_budget() {
        let text = "a".repeat(100);
        assert_eq!(estimate_tokens(&text), 25);
        assert_eq!(trim_to_token_budget(&text, 25).len(), 100);
        assert_eq!(trim_to_token_budget(&text, 10).len(), 40);
    }
}
