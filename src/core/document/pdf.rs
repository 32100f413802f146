//! Minimal PDF 1.3 writer for text-only pages.
//!
//! Object layout: 1 catalog, 2 page tree, 3 font, then a page object and its
//! content stream for each page.

use std::fmt::Write as _;

use super::layout::{PageLayout, PlacedLine};
use super::metrics::{PT_PER_MM, encode_win_ansi};

const FIRST_PAGE_OBJECT: usize = 4;

/// Escape a line into the body of a PDF literal string.
fn encode_literal(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match encode_win_ansi(c) {
            b @ (b'(' | b')' | b'\\') => {
                out.push(b'\\');
                out.push(b);
            }
            b => out.push(b),
        }
    }
    out
}

fn content_stream(page: &[PlacedLine], layout: &PageLayout) -> Vec<u8> {
    let x = layout.margin_mm * PT_PER_MM;
    let mut stream = Vec::new();
    for line in page.iter().filter(|line| !line.text.is_empty()) {
        let y = (layout.page_height_mm - line.y_mm) * PT_PER_MM;
        stream.extend_from_slice(
            format!("BT /F1 {:.2} Tf {x:.2} {y:.2} Td (", layout.font_size_pt).as_bytes(),
        );
        stream.extend_from_slice(&encode_literal(&line.text));
        stream.extend_from_slice(b") Tj ET\n");
    }
    stream
}

/// Record the offset of the next object and write its header.
fn begin_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>) {
    offsets.push(out.len());
    out.extend_from_slice(format!("{} 0 obj\n", offsets.len()).as_bytes());
}

/// Render paginated lines into a complete PDF file.
pub fn write_pdf(pages: &[Vec<PlacedLine>], layout: &PageLayout) -> Vec<u8> {
    let width = layout.page_width_mm * PT_PER_MM;
    let height = layout.page_height_mm * PT_PER_MM;

    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    out.extend_from_slice(b"%PDF-1.3\n%\xE2\xE3\xCF\xD3\n");

    begin_object(&mut out, &mut offsets);
    out.extend_from_slice(b"<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let mut kids = String::new();
    for i in 0..pages.len() {
        let _ = write!(kids, "{} 0 R ", FIRST_PAGE_OBJECT + i * 2);
    }
    begin_object(&mut out, &mut offsets);
    out.extend_from_slice(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.trim_end(),
            pages.len()
        )
        .as_bytes(),
    );

    begin_object(&mut out, &mut offsets);
    out.extend_from_slice(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n",
    );

    for (i, page) in pages.iter().enumerate() {
        let contents_id = FIRST_PAGE_OBJECT + i * 2 + 1;
        begin_object(&mut out, &mut offsets);
        out.extend_from_slice(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width:.2} {height:.2}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {contents_id} 0 R >>\nendobj\n"
            )
            .as_bytes(),
        );

        let stream = content_stream(page, layout);
        begin_object(&mut out, &mut offsets);
        out.extend_from_slice(format!("<< /Length {} >>\nstream\n", stream.len()).as_bytes());
        out.extend_from_slice(&stream);
        out.extend_from_slice(b"\nendstream\nendobj\n");
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1);
    for offset in &offsets {
        let _ = writeln!(xref, "{offset:010} 00000 n ");
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        offsets.len() + 1
    );
    out.extend_from_slice(xref.as_bytes());

    out
}
