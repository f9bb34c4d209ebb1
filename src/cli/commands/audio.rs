//! Audio command implementation.

use super::build_pipeline;
use crate::cli::output::format_size;
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the audio command.
pub async fn run_audio(
    link: &str,
    output: &str,
    print_script: bool,
    language: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let pipeline = build_pipeline(Operation::Narrate, settings)?;

    let spinner = Output::spinner("Writing and narrating summary...");
    let result = pipeline.audio(link, language).await;
    spinner.finish_and_clear();
    let narration = result?;

    std::fs::write(output, &narration.audio)?;
    Output::success(&format!(
        "Wrote narration to {} ({}, {} words)",
        output,
        format_size(narration.audio.len() as u64),
        narration.script.split_whitespace().count()
    ));

    if print_script {
        println!("{}", narration.script);
    }

    Ok(())
}
