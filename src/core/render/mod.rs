//! Text transforms for display and export.
//!
//! Display rendering always escapes first, so generated text can never inject
//! markup. Export cleanup produces plain text for the PDF writer.

mod display;
mod export;

pub use display::{escape_html, render_display_html};
pub use export::clean_for_export;
