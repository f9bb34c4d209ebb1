//! Transcript retrieval and edge trimming.
//!
//! A [`TranscriptSource`] returns timed caption segments for a video. The
//! [`TranscriptFetcher`] joins them into one string and trims intro/outro
//! words, reporting every soft failure as a [`TranscriptOutcome`] variant
//! instead of a placeholder string.

mod timedtext;
mod youtube;

pub use timedtext::parse_timed_text;
pub use youtube::YoutubeCaptions;

use crate::error::{Result, StudyError};
use crate::video_source::VideoReference;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A single timed caption segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Why a transcript source could not return segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The uploader disabled captions.
    Disabled,
    /// No captions in the requested language.
    NotFound { available: Vec<String> },
    /// Any other service or network failure.
    Transport(String),
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch caption segments for a video in the given language, in source order.
    async fn fetch_segments(
        &self,
        video_id: &str,
        language: &str,
    ) -> std::result::Result<Vec<TranscriptSegment>, FetchFailure>;
}

/// Result of fetching and trimming a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOutcome {
    /// The edge-trimmed transcript text.
    Ok(String),
    /// The transcript has no more than twice the edge size in words.
    TooShort { words: usize },
    /// Captions are disabled for the video.
    Disabled,
    /// No captions in the requested language.
    NotFound { language: String, available: Vec<String> },
    /// The service failed for some other reason.
    TransportError(String),
}

impl TranscriptOutcome {
    /// Convert into the trimmed text, or the error the pipeline aborts with.
    pub fn into_text(self, video_id: &str) -> Result<String> {
        let unavailable = |reason: String| StudyError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            reason,
        };

        match self {
            TranscriptOutcome::Ok(text) => Ok(text),
            TranscriptOutcome::TooShort { words } => Err(StudyError::TranscriptTooShort {
                video_id: video_id.to_string(),
                words,
            }),
            TranscriptOutcome::Disabled => {
                Err(unavailable("transcripts are disabled for this video".to_string()))
            }
            TranscriptOutcome::NotFound { language, available } => {
                let reason = if available.is_empty() {
                    format!("no transcript found in '{}'", language)
                } else {
                    format!(
                        "no transcript found in '{}' (available: {})",
                        language,
                        available.join(", ")
                    )
                };
                Err(unavailable(reason))
            }
            TranscriptOutcome::TransportError(detail) => Err(unavailable(detail)),
        }
    }
}

/// Join segment texts with single spaces, preserving order.
pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop `edge` words from both ends. Returns `Err(word_count)` when the text
/// has `2 * edge` words or fewer.
pub fn trim_edges(text: &str, edge: usize) -> std::result::Result<String, usize> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= 2 * edge {
        return Err(words.len());
    }
    Ok(words[edge..words.len() - edge].join(" "))
}

/// Fetches transcripts and trims their edges.
pub struct TranscriptFetcher {
    source: Arc<dyn TranscriptSource>,
    edge_words: usize,
}

impl TranscriptFetcher {
    pub fn new(source: Arc<dyn TranscriptSource>, edge_words: usize) -> Self {
        Self { source, edge_words }
    }

    /// Fetch, join, and trim the transcript for `video`.
    #[instrument(skip(self), fields(video = %video))]
    pub async fn fetch(&self, video: &VideoReference) -> TranscriptOutcome {
        let segments = match self
            .source
            .fetch_segments(video.video_id(), video.language())
            .await
        {
            Ok(segments) => segments,
            Err(FetchFailure::Disabled) => {
                warn!("Transcripts are disabled for {}", video.video_id());
                return TranscriptOutcome::Disabled;
            }
            Err(FetchFailure::NotFound { available }) => {
                warn!("No '{}' transcript for {}", video.language(), video.video_id());
                return TranscriptOutcome::NotFound {
                    language: video.language().to_string(),
                    available,
                };
            }
            Err(FetchFailure::Transport(detail)) => {
                warn!("Transcript fetch failed for {}: {}", video.video_id(), detail);
                return TranscriptOutcome::TransportError(detail);
            }
        };

        debug!("Fetched {} caption segments", segments.len());
        let full_text = join_segments(&segments);

        match trim_edges(&full_text, self.edge_words) {
            Ok(text) => {
                info!("Transcript ready ({} characters after trimming)", text.len());
                TranscriptOutcome::Ok(text)
            }
            Err(words) => TranscriptOutcome::TooShort { words },
        }
    }
}
