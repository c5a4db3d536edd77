//! Text measurement for PDF builtin fonts
//!
//! All wrapping, truncation and link-rectangle arithmetic measures text
//! before drawing it. The reports use the builtin Helvetica family, whose
//! widths are fixed by Adobe's AFM files (1000 units per em), so measurement
//! needs no font parsing at all.

use printpdf::BuiltinFont;

/// Width-measuring view of one builtin font.
#[derive(Debug, Clone, Copy)]
pub struct FontMeasurer {
    font: BuiltinFont,
}

impl FontMeasurer {
    pub fn new(font: BuiltinFont) -> Self {
        Self { font }
    }

    /// Character advance in 1000 units per em.
    fn char_width(&self, c: char) -> u16 {
        // Builtin fonts are WinAnsi; non-ASCII falls back to an average width.
        if !c.is_ascii() {
            return 556;
        }
        let code = c as usize;
        match self.font {
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
                HELVETICA_BOLD_WIDTHS.get(code).copied().unwrap_or(278)
            }
            _ => HELVETICA_WIDTHS.get(code).copied().unwrap_or(278),
        }
    }

    /// Measure text width in points at the given font size.
    pub fn width_pt(&self, text: &str, font_size: f32) -> f32 {
        let total: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        (total as f32 / 1000.0) * font_size
    }
}

/// Measurer for Helvetica regular.
pub fn helvetica() -> FontMeasurer {
    FontMeasurer::new(BuiltinFont::Helvetica)
}

/// Measurer for Helvetica-Bold.
pub fn helvetica_bold() -> FontMeasurer {
    FontMeasurer::new(BuiltinFont::HelveticaBold)
}

// =============================================================================
// Adobe AFM character width tables (ASCII subset, 1000 units per em)
// =============================================================================

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
];
