//! Notes command implementation.

use super::build_pipeline;
use crate::cli::output::format_size;
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the notes command.
pub async fn run_notes(
    link: &str,
    output: &str,
    print_text: bool,
    language: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let pipeline = build_pipeline(Operation::Generate, settings)?;

    let spinner = Output::spinner("Summarizing transcript into notes...");
    let result = pipeline.notes(link, language).await;
    spinner.finish_and_clear();
    let notes = result?;

    std::fs::write(output, &notes.pdf)?;
    Output::success(&format!(
        "Wrote notes to {} ({})",
        output,
        format_size(notes.pdf.len() as u64)
    ));

    if print_text {
        println!("{}", notes.article);
    }

    Ok(())
}
