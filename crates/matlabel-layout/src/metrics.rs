//! Font faces and text measurement.
//!
//! # Design
//! - Layout never talks to a font rasteriser; it asks a [`TextMeasurer`] for
//!   advance widths so tests can swap in deterministic metrics.
//! - [`StandardMetrics`] carries the AFM advance widths of the PDF base-14
//!   Times faces, which are the faces the renderer references. Measuring with
//!   the same table the viewer uses keeps fitted text inside its box.

use serde::{Deserialize, Serialize};

/// Typefaces available to the label layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFace {
    /// Times Roman, used for descriptions.
    TimesRoman,
    /// Times Bold, used for codes and stamps.
    TimesBold,
}

impl FontFace {
    /// PDF base font name for the face.
    #[must_use]
    pub const fn base_font(self) -> &'static str {
        match self {
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
        }
    }
}

/// Measures rendered text width for a face at a given size.
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` in points when set in `face` at `size` points.
    fn text_width(&self, text: &str, face: FontFace, size: f32) -> f32;
}

/// AFM-backed metrics for the base-14 Times faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMetrics;

impl StandardMetrics {
    /// Advance width of a single character in 1/1000 em units.
    ///
    /// Characters without a `WinAnsiEncoding` byte are drawn as `?` and
    /// measure as `?`.
    #[must_use]
    pub fn glyph_width(face: FontFace, ch: char) -> u16 {
        let table = match face {
            FontFace::TimesRoman => &TIMES_ROMAN,
            FontFace::TimesBold => &TIMES_BOLD,
        };
        let byte = win_ansi_byte(ch).unwrap_or(b'?');
        table[usize::from(byte - FIRST_CODE)]
    }
}

impl TextMeasurer for StandardMetrics {
    fn text_width(&self, text: &str, face: FontFace, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(Self::glyph_width(face, ch)))
            .sum();
        em_units_to_points(units, size)
    }
}

/// `WinAnsiEncoding` byte for a printable character, if it has one.
///
/// Covers printable ASCII, Latin-1 from U+00A0, and the typographic
/// punctuation and letters Windows-1252 places in 0x80..=0x9F.
#[must_use]
pub const fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    if matches!(code, 0x20..=0x7E | 0xA0..=0xFF) {
        #[allow(clippy::cast_possible_truncation)]
        return Some(code as u8);
    }
    let byte = match ch {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

#[allow(clippy::cast_precision_loss)]
fn em_units_to_points(units: u32, size: f32) -> f32 {
    units as f32 * size / 1000.0
}

const FIRST_CODE: u8 = 0x20;

// Advance widths for WinAnsi bytes 0x20..=0xFF from the Adobe AFM files,
// sixteen per row. Unassigned slots (0x7F, 0x81, 0x8D, 0x8F, 0x90, 0x9D) are
// never looked up and hold 0.
#[rustfmt::skip]
const TIMES_ROMAN: [u16; 224] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, 0,
    500, 0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889, 0, 611, 0,
    0, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333, 722, 0, 444, 722,
    250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333,
    400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444,
    722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
    722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500,
    444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 224] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520, 0,
    500, 0, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 1000, 0, 667, 0,
    0, 333, 333, 500, 500, 350, 500, 1000, 333, 1000, 389, 333, 722, 0, 444, 722,
    250, 333, 500, 500, 500, 500, 220, 500, 333, 747, 300, 500, 570, 333, 747, 333,
    400, 570, 300, 300, 333, 556, 540, 250, 333, 300, 330, 500, 750, 750, 750, 500,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 389, 389, 389, 389,
    722, 722, 778, 778, 778, 778, 778, 570, 778, 722, 722, 722, 722, 722, 611, 556,
    500, 500, 500, 500, 500, 500, 722, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    500, 556, 500, 500, 500, 500, 500, 570, 500, 556, 556, 556, 556, 500, 556, 500,
];
