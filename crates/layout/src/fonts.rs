//! Width metrics for the two base-14 faces the renderer registers.
//!
//! Widths are the Adobe AFM advance widths in thousandths of an em, covering
//! ASCII 0x20..=0x7E. Characters outside the table fall back to an average
//! width, which is enough for the occasional accented character in a note.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub fn postscript_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Measures rendered text width. The layout engine treats this as a pure
/// function and queries it repeatedly during the size descent.
pub trait FontMetrics {
    /// Width of `text` rendered in `font` at `size`, in points.
    fn text_width(&self, text: &str, font: Font, size: f32) -> f32;
}

/// Metrics backed by the static AFM tables below.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base14Metrics;

struct WidthTable {
    /// `widths[i]` is the advance of ASCII character `i + 32`.
    widths: [u16; 95],
    /// Fallback for characters outside 0x20..=0x7E.
    average: u16,
}

impl WidthTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average
        }
    }
}

impl Base14Metrics {
    fn table(font: Font) -> &'static WidthTable {
        match font {
            Font::Helvetica => &HELVETICA,
            Font::HelveticaBold => &HELVETICA_BOLD,
        }
    }
}

impl FontMetrics for Base14Metrics {
    fn text_width(&self, text: &str, font: Font, size: f32) -> f32 {
        let table = Self::table(font);
        let units: u32 = text.chars().map(|c| table.char_width(c) as u32).sum();
        units as f32 / 1000.0 * size
    }
}

static HELVETICA: WidthTable = WidthTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        278,  278,  355,  556,  556,  889,  667,  191,  333,  333,  389,  584,  278,  333,  278,  278,
        // 0-9
        556,  556,  556,  556,  556,  556,  556,  556,  556,  556,
        // :     ;     <     =     >     ?     @
        278,  278,  584,  584,  584,  556, 1015,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        667,  667,  722,  722,  667,  611,  778,  722,  278,  500,  667,  556,  833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        722,  778,  667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,
        // [     \     ]     ^     _     `
        278,  278,  278,  469,  556,  333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        556,  556,  500,  556,  556,  278,  556,  556,  222,  222,  500,  222,  833,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        556,  556,  556,  556,  333,  500,  278,  556,  500,  722,  500,  500,  500,
        // {     |     }     ~
        334,  260,  334,  584,
    ],
    average: 556,
};

static HELVETICA_BOLD: WidthTable = WidthTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        278,  333,  474,  556,  556,  889,  722,  238,  333,  333,  389,  584,  278,  333,  278,  278,
        // 0-9
        556,  556,  556,  556,  556,  556,  556,  556,  556,  556,
        // :     ;     <     =     >     ?     @
        333,  333,  584,  584,  584,  611,  975,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        722,  722,  722,  722,  667,  611,  778,  722,  278,  556,  722,  611,  833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        722,  778,  667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,
        // [     \     ]     ^     _     `
        333,  278,  333,  584,  556,  333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        556,  611,  556,  611,  556,  333,  611,  611,  278,  278,  556,  278,  889,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        611,  611,  611,  611,  389,  556,  333,  611,  556,  778,  556,  556,  500,
        // {     |     }     ~
        389,  280,  389,  584,
    ],
    average: 611,
};
