//! Recursive separator-based text splitting.
//!
//! Tries separators in priority order and recurses into any piece that is
//! still too long, then merges small pieces back up to the size limit while
//! carrying an overlap between consecutive units. Separators are kept at the
//! start of the piece that follows them. Sizes are measured in characters.

use tracing::warn;

/// Default separators: paragraph, line, sentence end, comma, space, character.
pub const DEFAULT_SEPARATORS: [&str; 8] = ["\n\n", "\n", ".", "!", "?", ",", " ", ""];

/// Splits text into units of at most `unit_size` characters where possible.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    unit_size: usize,
    overlap: usize,
    separators: Vec<String>,
}

impl RecursiveSplitter {
    /// Create a splitter. The overlap is clamped below the unit size.
    pub fn new(unit_size: usize, overlap: usize) -> Self {
        let unit_size = unit_size.max(1);
        Self {
            unit_size,
            overlap: overlap.min(unit_size - 1),
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_separators(mut self, separators: &[&str]) -> Self {
        self.separators = separators.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn unit_size(&self) -> usize {
        self.unit_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into units, in order.
    pub fn split(&self, text: &str) -> Vec<String> {
        let separators: Vec<&str> = self.separators.iter().map(String::as_str).collect();
        self.split_with(text, &separators)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let mut units = Vec::new();

        // First separator present in the text; the empty separator always matches.
        let mut separator = separators.last().copied().unwrap_or("");
        let mut remaining: &[&str] = &[];
        for (i, sep) in separators.iter().enumerate() {
            if sep.is_empty() {
                separator = sep;
                break;
            }
            if text.contains(sep) {
                separator = sep;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let mut pending: Vec<String> = Vec::new();
        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) < self.unit_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                units.extend(self.merge(&pending));
                pending.clear();
            }

            if remaining.is_empty() {
                units.push(piece);
            } else {
                units.extend(self.split_with(&piece, remaining));
            }
        }

        if !pending.is_empty() {
            units.extend(self.merge(&pending));
        }

        units
    }

    /// Merge consecutive pieces into units no longer than `unit_size`,
    /// keeping up to `overlap` characters of trailing context.
    fn merge(&self, pieces: &[String]) -> Vec<String> {
        let mut units = Vec::new();
        let mut window: std::collections::VecDeque<&str> = std::collections::VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > self.unit_size {
                if total > self.unit_size {
                    warn!(
                        "Created a unit of {} characters, longer than the limit of {}",
                        total, self.unit_size
                    );
                }

                if !window.is_empty() {
                    if let Some(unit) = join_window(&window) {
                        units.push(unit);
                    }

                    while total > self.overlap || (total + len > self.unit_size && total > 0) {
                        match window.pop_front() {
                            Some(front) => total -= char_len(front),
                            None => break,
                        }
                    }
                }
            }

            window.push_back(piece);
            total += len;
        }

        if let Some(unit) = join_window(&window) {
            units.push(unit);
        }

        units
    }
}

impl Default for RecursiveSplitter {
    fn default() -> Self {
        Self::new(800, 100)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn join_window(window: &std::collections::VecDeque<&str>) -> Option<String> {
    let joined: String = window.iter().copied().collect();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split on `separator`, attaching each separator to the start of the
/// following piece. Empty pieces are dropped. The empty separator splits
/// into characters.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(|c| c.to_string()).collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices(separator) {
        if idx > start {
            pieces.push(text[start..idx].to_string());
        }
        start = idx;
    }
    if start < text.len() {
        pieces.push(text[start..].to_string());
    }

    pieces.into_iter().filter(|p| !p.is_empty()).collect()
}
