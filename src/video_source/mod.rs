//! Video references.
//!
//! Resolves user input (watch URLs, short links, bare IDs) into a validated
//! [`VideoReference`] before anything touches the network.

mod youtube;

pub use youtube::{resolve_video_id, VIDEO_ID_LEN};

use crate::error::Result;
use serde::Serialize;

/// A resolved YouTube video plus the transcript language to request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoReference {
    raw_input: String,
    video_id: String,
    language: String,
}

impl VideoReference {
    /// Resolve `input` into a reference. Fails with `InvalidIdentifier`
    /// when no 11-character ID can be extracted.
    pub fn new(input: &str, language: &str) -> Result<Self> {
        let video_id = resolve_video_id(input)?;
        Ok(Self {
            raw_input: input.to_string(),
            video_id,
            language: language.to_string(),
        })
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.video_id, self.language)
    }
}
