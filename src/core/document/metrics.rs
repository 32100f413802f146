//! Helvetica advance widths in WinAnsi encoding.

/// Points per millimetre.
pub(super) const PT_PER_MM: f64 = 72.0 / 25.4;

/// Widths for 0x20..=0x7E, in 1/1000 em.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Widths for 0xA0..=0xFF, in 1/1000 em.
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

/// Map a char to its WinAnsi code. Unsupported chars become `?`.
pub fn encode_win_ansi(c: char) -> u8 {
    match c {
        '\t' => b' ',
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

/// Advance width of a WinAnsi code in 1/1000 em.
pub fn glyph_width(code: u8) -> u16 {
    match code {
        0x20..=0x7E => ASCII_WIDTHS[(code - 0x20) as usize],
        0xA0..=0xFF => LATIN1_WIDTHS[(code - 0xA0) as usize],
        0x80 | 0x83 | 0x86 | 0x87 | 0x96 => 556,
        0x82 | 0x91 | 0x92 => 222,
        0x84 | 0x88 | 0x8B | 0x93 | 0x94 | 0x98 | 0x9B => 333,
        0x85 | 0x89 | 0x8C | 0x97 | 0x99 => 1000,
        0x8A | 0x9F => 667,
        0x8E => 611,
        0x95 => 350,
        0x9A | 0x9E => 500,
        0x9C => 944,
        _ => 0,
    }
}

/// Rendered width of `text` in millimetres at `font_size_pt`.
pub fn text_width_mm(text: &str, font_size_pt: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| glyph_width(encode_win_ansi(c)) as u32)
        .sum();
    units as f64 / 1000.0 * font_size_pt / PT_PER_MM
}
