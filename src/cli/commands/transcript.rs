//! Transcript command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{TranscriptFetcher, YoutubeCaptions};
use crate::video_source::VideoReference;
use anyhow::Result;
use std::sync::Arc;

/// Fetch and trim the transcript for `link`. Needs no API keys.
pub(super) async fn fetch_trimmed(
    link: &str,
    language: Option<&str>,
    settings: &Settings,
) -> Result<String> {
    let language = language.unwrap_or(settings.transcript.language.as_str());
    let video = VideoReference::new(link, language)?;

    let fetcher = TranscriptFetcher::new(
        Arc::new(YoutubeCaptions::new()),
        settings.transcript.edge_words,
    );

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video));
    let outcome = fetcher.fetch(&video).await;
    spinner.finish_and_clear();

    Ok(outcome.into_text(video.video_id())?)
}

/// Run the transcript command.
pub async fn run_transcript(link: &str, language: Option<&str>, settings: Settings) -> Result<()> {
    let text = fetch_trimmed(link, language, &settings).await?;
    println!("{}", text);
    Ok(())
}
