//! PDF output for notes, using printpdf's builtin Helvetica fonts.

use super::layout::NotesSink;
use crate::error::{Result, StudyError};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;

const CELL_HEIGHT: f32 = 10.0;
const LINE_HEIGHT: f32 = 8.0;
const LIST_INDENT: f32 = 5.0;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

/// A4 notes document with top-down flow and automatic page breaks.
pub struct PdfNotes {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Distance from the top edge of the current page, in mm.
    y: f32,
    pages: usize,
}

impl PdfNotes {
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| StudyError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| StudyError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: MARGIN,
            pages: 1,
        })
    }

    /// Number of pages emitted so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Serialize the document.
    pub fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| StudyError::Render(e.to_string()))
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = MARGIN;
        self.pages += 1;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y + height > PAGE_HEIGHT - MARGIN {
            self.new_page();
        }
    }

    /// Write one line in a cell of `height` starting at `x`, then advance.
    fn cell(&mut self, text: &str, x: f32, height: f32, size: f32, bold: bool) {
        self.ensure_space(height);
        let baseline = self.y + height * 0.7;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - baseline), font);
        self.y += height;
    }

    fn gap(&mut self, height: f32) {
        self.y += height;
    }

    fn wrapped(&mut self, text: &str, x: f32, width: f32, continuation_indent: f32) {
        let max_chars = chars_per_line(width, BODY_SIZE);
        for (i, line) in wrap(text, max_chars).iter().enumerate() {
            let indent = if i == 0 { 0.0 } else { continuation_indent };
            self.cell(line, x + indent, LINE_HEIGHT, BODY_SIZE, false);
        }
    }

    fn list(&mut self, items: &[String], marker: impl Fn(usize) -> String) {
        for (idx, item) in items.iter().enumerate() {
            let text = format!("{} {}", marker(idx + 1), fold_to_latin1(item));
            let hanging = text_width(&format!("{} ", marker(idx + 1)), BODY_SIZE);
            self.wrapped(&text, MARGIN + LIST_INDENT, CONTENT_WIDTH - LIST_INDENT, hanging);
        }
        self.gap(LINE_HEIGHT);
    }
}

impl NotesSink for PdfNotes {
    fn chapter_title(&mut self, title: &str) {
        let title = fold_to_latin1(title);
        let width = text_width(&title, TITLE_SIZE).min(CONTENT_WIDTH);
        let x = MARGIN + (CONTENT_WIDTH - width) / 2.0;
        self.cell(&title, x, CELL_HEIGHT, TITLE_SIZE, true);
        self.gap(5.0);
    }

    fn section_heading(&mut self, heading: &str) {
        self.cell(&fold_to_latin1(heading), MARGIN, CELL_HEIGHT, HEADING_SIZE, true);
        self.gap(2.0);
    }

    fn body_text(&mut self, text: &str) {
        self.wrapped(&fold_to_latin1(text), MARGIN, CONTENT_WIDTH, 0.0);
        self.gap(LINE_HEIGHT);
    }

    fn bullet_list(&mut self, items: &[String]) {
        self.list(items, |_| "-".to_string());
    }

    fn numbered_list(&mut self, items: &[String]) {
        self.list(items, |n| format!("{}.", n));
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_EM * PT_TO_MM
}

fn chars_per_line(width: f32, size: f32) -> usize {
    ((width / (size * AVG_GLYPH_EM * PT_TO_MM)).floor() as usize).max(1)
}

/// Greedy word wrap; words longer than a line are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Map text onto what the builtin fonts can draw.
fn fold_to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{2022}' => '*',
            '\u{2026}' => '.',
            '\u{00A0}' => ' ',
            c if (c as u32) < 0x100 && !c.is_control() => c,
            c if c.is_whitespace() => ' ',
            _ => '?',
        })
        .collect()
}
