//! Chunks command implementation.

use super::transcript::fetch_trimmed;
use crate::chunking::TextChunker;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the chunks command.
pub async fn run_chunks(link: &str, language: Option<&str>, settings: Settings) -> Result<()> {
    let text = fetch_trimmed(link, language, &settings).await?;

    let chunker = TextChunker::new(settings.chunking.unit_size, settings.chunking.unit_overlap);
    let chunks = chunker.chunk(&text);

    Output::header("Chunk plan");
    Output::kv("Transcript", &format!("{} characters", text.chars().count()));
    Output::kv(
        "Chunks",
        &format!("{} ({} with text)", chunks.len(), chunks.non_empty()),
    );

    for (idx, chunk) in chunks.texts().iter().enumerate() {
        Output::chunk_line(idx, chunk.chars().count(), chunk);
    }

    Ok(())
}
