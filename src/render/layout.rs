//! Line classification for the notes article.
//!
//! Walks the article line by line and turns it into render calls on a
//! [`NotesSink`]. List lines accumulate into runs which are flushed when a
//! line of another kind arrives, on a blank line, and at end of input.

/// Render calls produced by the layout pass.
pub trait NotesSink {
    fn chapter_title(&mut self, title: &str);
    fn section_heading(&mut self, heading: &str);
    fn body_text(&mut self, text: &str);
    fn bullet_list(&mut self, items: &[String]);
    fn numbered_list(&mut self, items: &[String]);
}

/// What a single trimmed line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `Title: ...`, carrying the text after the prefix.
    Title(&'a str),
    /// A line ending with a colon, kept whole.
    Heading(&'a str),
    /// `- item`, carrying the item.
    Bullet(&'a str),
    /// `N. item`, carrying the item.
    Numbered(&'a str),
    Blank,
    Body(&'a str),
}

/// Classify one line. Leading and trailing whitespace is ignored.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(title) = line.strip_prefix("Title:") {
        return LineKind::Title(title.trim());
    }
    if line.ends_with(':') {
        return LineKind::Heading(line);
    }
    if let Some(item) = line.strip_prefix("- ") {
        return LineKind::Bullet(item.trim());
    }
    if let Some(item) = numbered_item(line) {
        return LineKind::Numbered(item);
    }
    LineKind::Body(line)
}

/// `"12. text"` -> `Some("text")`. Needs at least one digit, a dot, then
/// whitespace or end of line, so lines shorter than two characters and
/// decimals like "1.5" are never numbered.
fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest.trim()),
        Some(_) => None,
    }
}

/// Current list run.
#[derive(Debug, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    None,
    Bullet(Vec<String>),
    Numbered(Vec<String>),
}

/// State machine driving a [`NotesSink`].
#[derive(Debug, Default)]
pub struct LayoutMachine {
    mode: Mode,
}

impl LayoutMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one line.
    pub fn feed<S: NotesSink + ?Sized>(&mut self, line: &str, sink: &mut S) {
        match classify(line) {
            LineKind::Title(title) => {
                self.flush(sink);
                sink.chapter_title(title);
            }
            LineKind::Heading(heading) => {
                self.flush(sink);
                sink.section_heading(heading);
            }
            LineKind::Bullet(item) => {
                if let Mode::Bullet(items) = &mut self.mode {
                    items.push(item.to_string());
                } else {
                    self.flush(sink);
                    self.mode = Mode::Bullet(vec![item.to_string()]);
                }
            }
            LineKind::Numbered(item) => {
                if let Mode::Numbered(items) = &mut self.mode {
                    items.push(item.to_string());
                } else {
                    self.flush(sink);
                    self.mode = Mode::Numbered(vec![item.to_string()]);
                }
            }
            LineKind::Blank => self.flush(sink),
            LineKind::Body(text) => {
                self.flush(sink);
                sink.body_text(text);
            }
        }
    }

    /// Flush any pending run at end of input.
    pub fn finish<S: NotesSink + ?Sized>(mut self, sink: &mut S) {
        self.flush(sink);
    }

    fn flush<S: NotesSink + ?Sized>(&mut self, sink: &mut S) {
        match std::mem::take(&mut self.mode) {
            Mode::None => {}
            Mode::Bullet(items) => sink.bullet_list(&items),
            Mode::Numbered(items) => sink.numbered_list(&items),
        }
    }
}

/// Lay out a whole article onto `sink`.
pub fn layout_article<S: NotesSink + ?Sized>(article: &str, sink: &mut S) {
    let mut machine = LayoutMachine::new();
    for line in article.lines() {
        machine.feed(line, sink);
    }
    machine.finish(sink);
}
