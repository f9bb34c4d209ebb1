//! Transcript chunking for LLM prompts.
//!
//! The number of chunks depends only on transcript length. Text is first cut
//! into natural units by a [`RecursiveSplitter`], then consecutive units are
//! binned into that many roughly equal chunks.

mod splitter;

pub use splitter::{RecursiveSplitter, DEFAULT_SEPARATORS};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pick the number of chunks for a transcript of `len` characters.
pub fn chunk_count_for(len: usize) -> usize {
    match len {
        0..=999 => 5,
        1000..=1999 => 6,
        2000..=3999 => 7,
        4000..=7999 => 8,
        _ => 9,
    }
}

/// Ordered groups of transcript text, one group per LLM request.
///
/// Padding groups hold a single empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSet {
    groups: Vec<Vec<String>>,
}

impl ChunkSet {
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// Each group joined with spaces, in order.
    pub fn texts(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.join(" ")).collect()
    }

    /// All segments of all groups, in order.
    pub fn flatten(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.iter().map(String::as_str))
            .collect()
    }

    /// Number of groups with any non-whitespace text.
    pub fn non_empty(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| g.iter().any(|s| !s.trim().is_empty()))
            .count()
    }
}

/// Splits transcript text into a [`ChunkSet`].
#[derive(Debug, Clone, Default)]
pub struct TextChunker {
    splitter: RecursiveSplitter,
}

impl TextChunker {
    pub fn new(unit_size: usize, unit_overlap: usize) -> Self {
        Self {
            splitter: RecursiveSplitter::new(unit_size, unit_overlap),
        }
    }

    /// Chunk `text` into exactly `chunk_count_for(text length)` groups.
    pub fn chunk(&self, text: &str) -> ChunkSet {
        let target = chunk_count_for(text.chars().count());
        let units = self.splitter.split(text);
        let total = units.len();

        let mut groups: Vec<Vec<String>> = Vec::with_capacity(target);
        if total > 0 {
            let bin = total.div_ceil(target);
            for bin_units in units.chunks(bin) {
                groups.push(vec![bin_units.join(" ")]);
            }
        }

        while groups.len() < target {
            groups.push(vec![String::new()]);
        }

        debug!(
            "Split {} characters into {} units across {} chunks",
            text.len(),
            total,
            groups.len()
        );

        ChunkSet::new(groups)
    }
}
