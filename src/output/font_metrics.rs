//! Helvetica glyph widths for line reflow
//!
//! Widths are in thousandths of an em, from the standard Helvetica AFM.
//! Index = (char as usize) - 32, covering ASCII 0x20..=0x7E.

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, // sp ! " # $ % & '
    333, 333, 389, 584, 278, 333, 278, 278, // ( ) * + , - . /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // : ; < = > ? @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [ \ ] ^ _ `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // { | } ~
];

/// Fallback for anything outside printable ASCII
const AVERAGE_WIDTH: u16 = 556;

pub const POINTS_TO_MM: f32 = 25.4 / 72.0;

/// Width of one character in em units.
pub fn char_width_em(c: char) -> f32 {
    let code = c as usize;
    let width = if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[code - 32]
    } else {
        AVERAGE_WIDTH
    };
    width as f32 / 1000.0
}

/// Width of a string in em units.
pub fn measure_em(s: &str) -> f32 {
    s.chars().map(char_width_em).sum()
}

/// Width of a string in millimetres at the given font size.
pub fn measure_mm(s: &str, font_size_pt: f32) -> f32 {
    measure_em(s) * font_size_pt * POINTS_TO_MM
}

/// Non-Latin-1 characters present in WinAnsiEncoding (0x80..=0x9F).
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Whether the builtin Helvetica can draw `c`.
pub fn is_win_ansi(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF) || WIN_ANSI_EXTRAS.contains(c)
}

/// Distinct characters of `text` the builtin font cannot draw, in order of
/// first appearance. Line breaks are not counted.
pub fn unencodable_chars(text: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in text.chars() {
        if !is_win_ansi(c) && !matches!(c, '\n' | '\r') && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}
