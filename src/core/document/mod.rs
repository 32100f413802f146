//! Plain-text document export.
//!
//! Text is cleaned, wrapped to the printable width using Helvetica metrics,
//! paginated into fixed-height lines and written as a minimal PDF.

mod layout;
mod metrics;
mod pdf;

use bytes::Bytes;
use thiserror::Error;

pub use layout::{PageLayout, PlacedLine, paginate, wrap_text};
pub use metrics::{encode_win_ansi, glyph_width, text_width_mm};
pub use pdf::write_pdf;

use crate::core::render::clean_for_export;

/// File name offered for downloaded exports.
pub const EXPORT_FILENAME: &str = "Neura.pdf";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExportError {
    #[error("No text to download.")]
    EmptyDocument,
}

pub type ExportResult<T> = Result<T, ExportError>;

/// A rendered export ready to be written or served.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: &'static str,
    pub page_count: usize,
    pub bytes: Bytes,
}

/// Clean, wrap, paginate and render `text` with the default A4 layout.
pub fn export_pdf(text: &str) -> ExportResult<ExportedDocument> {
    if text.trim().is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let layout = PageLayout::default();
    let cleaned = clean_for_export(text);
    let lines = wrap_text(&cleaned, layout.text_width_mm(), layout.font_size_pt);
    let pages = paginate(lines, &layout);
    let bytes = write_pdf(&pages, &layout);

    tracing::debug!(pages = pages.len(), bytes = bytes.len(), "PDF export rendered");

    Ok(ExportedDocument {
        filename: EXPORT_FILENAME,
        page_count: pages.len(),
        bytes: Bytes::from(bytes),
    })
}
