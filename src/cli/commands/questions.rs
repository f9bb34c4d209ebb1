//! Questions command implementation.

use super::build_pipeline;
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the questions command.
pub async fn run_questions(
    link: &str,
    num: Option<usize>,
    difficulty: Option<String>,
    output: Option<String>,
    language: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let num = num.unwrap_or(settings.questions.default_count);
    let difficulty = difficulty.unwrap_or_else(|| settings.questions.default_difficulty.clone());

    let pipeline = build_pipeline(Operation::Generate, settings)?;

    let spinner = Output::spinner(&format!("Generating {} {} questions...", num, difficulty));
    let result = pipeline.questions(link, num, &difficulty, language).await;
    spinner.finish_and_clear();
    let questions = result?;

    let json = serde_json::to_string_pretty(&questions)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            Output::success(&format!("Wrote {} questions to {}", questions.len(), path));
        }
        None => println!("{}", json),
    }

    Ok(())
}
