//! Notes rendering.

mod layout;
mod pdf;

pub use layout::{classify, layout_article, LayoutMachine, LineKind, NotesSink};
pub use pdf::PdfNotes;

use crate::error::Result;

/// Lay out a notes article and return the PDF bytes.
pub fn render_notes_pdf(article: &str) -> Result<Vec<u8>> {
    let mut pdf = PdfNotes::new("Notes")?;
    layout_article(article, &mut pdf);
    pdf.finish()
}
