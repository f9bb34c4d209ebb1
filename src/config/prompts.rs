//! Prompt templates for tubestudy.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub questions: QuestionPrompts,
    pub notes: NotesPrompts,
    pub voice: VoicePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for multiple-choice question generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionPrompts {
    pub generate: String,
}

impl Default for QuestionPrompts {
    fn default() -> Self {
        Self {
            generate: r#"You are a helpful assistant.

Generate {{num}} multiple-choice questions from the given text.
Difficulty Level => {{difficulty}}
Answer the following in strict JSON only, no explanations, no markdown.

Each question must include:
- "question": a clear question
- "options": a list of 4 options
- "answer": the correct option (text only, not the letter)

Respond ONLY in valid JSON list format like:

[
  {
    "question": "What is the capital of France?",
    "options": ["Paris", "London", "Berlin", "Rome"],
    "answer": "Paris"
  }
]

Text:
"""{{text}}""""#
                .to_string(),
        }
    }
}

/// Prompts for the notes article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesPrompts {
    pub chunk_summary: String,
    pub article: String,
}

impl Default for NotesPrompts {
    fn default() -> Self {
        Self {
            chunk_summary: r#"Summarize the following content into 3-4 informative sentences capturing the core points.

Text:
"""{{text}}""""#
                .to_string(),

            article: r#"Generate a well-formatted article in plain text format using the following structure. Do not use markdown or special characters, no explanations and no currency or other symbols.
1. Title: [Your Title Here]
2. Section headings ending with a colon (e.g., Introduction:)
3. Include 1-2 short paragraphs (2-4 sentences each) per section
4. Add a bullet list using '- ' (e.g., - Benefit A)
5. Add a numbered list using '1.', '2.', etc.
6. End with a Conclusion: section
7. End the file with: - End of Document -

{{text}}"#
                .to_string(),
        }
    }
}

/// Prompts for the narrated summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoicePrompts {
    pub chunk_summary: String,
    pub script: String,
}

impl Default for VoicePrompts {
    fn default() -> Self {
        Self {
            chunk_summary: r#"Summarize the following content chunk into 2-3 sentences suitable for audio:

"""{{text}}""""#
                .to_string(),

            script: r#"You are an educational assistant.

Summarize the following content into a spoken script that:
- Is suitable for listening as audio
- Covers all important points
- Uses simple and clear language
- Starts directly with the explanation of the topic, without mentioning errors, instructions, or how the text was produced
- Lasts no longer than 3 minutes when spoken aloud (~350-400 words)

Write it as if someone is narrating naturally.

Text:
"""{{text}}""""#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let questions_path = custom_path.join("questions.toml");
            if questions_path.exists() {
                let content = std::fs::read_to_string(&questions_path)?;
                prompts.questions = toml::from_str(&content)?;
            }

            let notes_path = custom_path.join("notes.toml");
            if notes_path.exists() {
                let content = std::fs::read_to_string(&notes_path)?;
                prompts.notes = toml::from_str(&content)?;
            }

            let voice_path = custom_path.join("voice.toml");
            if voice_path.exists() {
                let content = std::fs::read_to_string(&voice_path)?;
                prompts.voice = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &[(&str, String)]) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.to_string(), value.clone());
        }
        Self::render(template, &merged)
    }
}
