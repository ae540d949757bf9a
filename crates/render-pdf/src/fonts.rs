//! Standard-14 fonts and their advance widths.
//!
//! Widths come from the Adobe AFM files, in 1/1000 em, for the printable
//! ASCII range. Bytes above 0x7F use a small table of the WinAnsi characters
//! the renderer actually produces, plus a per-family average.

use crate::encoding::to_win_ansi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Font {
    pub family: FontFamily,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub const HELVETICA: Font = Font::regular(FontFamily::Helvetica);
    pub const HELVETICA_BOLD: Font = Font::regular(FontFamily::Helvetica).with_bold(true);
    pub const TIMES: Font = Font::regular(FontFamily::Times);
    pub const COURIER: Font = Font::regular(FontFamily::Courier);

    /// Every font registered in a document's resources.
    pub const ALL: [Font; 12] = {
        let families = [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier];
        let mut all = [Font::HELVETICA; 12];
        let mut i = 0;
        while i < 12 {
            all[i] = Font {
                family: families[i / 4],
                bold: (i / 2) % 2 == 1,
                italic: i % 2 == 1,
            };
            i += 1;
        }
        all
    };

    pub const fn regular(family: FontFamily) -> Self {
        Self {
            family,
            bold: false,
            italic: false,
        }
    }

    pub const fn with_bold(self, bold: bool) -> Self {
        Self { bold, ..self }
    }

    pub const fn with_italic(self, italic: bool) -> Self {
        Self { italic, ..self }
    }

    /// The PostScript name used as `/BaseFont`.
    pub fn base_font_name(&self) -> &'static str {
        match (self.family, self.bold, self.italic) {
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Times, false, false) => "Times-Roman",
            (FontFamily::Times, true, false) => "Times-Bold",
            (FontFamily::Times, false, true) => "Times-Italic",
            (FontFamily::Times, true, true) => "Times-BoldItalic",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }

    /// The name this font is registered under in page resources (`F1`..`F12`).
    pub fn resource_name(&self) -> String {
        let family = match self.family {
            FontFamily::Helvetica => 0,
            FontFamily::Times => 1,
            FontFamily::Courier => 2,
        };
        let index = family * 4 + usize::from(self.bold) * 2 + usize::from(self.italic);
        format!("F{}", index + 1)
    }

    /// Advance width of `text` at `size` points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = to_win_ansi(text)
            .into_iter()
            .map(|b| u32::from(self.byte_width(b)))
            .sum();
        units as f32 * size / 1000.0
    }

    fn byte_width(&self, byte: u8) -> u16 {
        if self.family == FontFamily::Courier {
            return 600;
        }
        let regular = match byte {
            32..=126 => {
                let table = match (self.family, self.bold) {
                    (FontFamily::Helvetica, false) => &HELVETICA_WIDTHS,
                    (FontFamily::Helvetica, true) => &HELVETICA_BOLD_WIDTHS,
                    _ => &TIMES_ROMAN_WIDTHS,
                };
                table[usize::from(byte - 32)]
            }
            _ => self.extended_width(byte),
        };
        // Times bold faces are measured from the roman widths, slightly widened
        if self.family == FontFamily::Times && self.bold {
            regular + regular / 20
        } else {
            regular
        }
    }

    fn extended_width(&self, byte: u8) -> u16 {
        let helvetica = self.family == FontFamily::Helvetica;
        match byte {
            0x95 => 350,
            0x91 | 0x92 => {
                if helvetica {
                    222
                } else {
                    333
                }
            }
            0x93 | 0x94 => {
                if helvetica {
                    333
                } else {
                    444
                }
            }
            0x96 => {
                if helvetica {
                    556
                } else {
                    500
                }
            }
            0x85 | 0x97 | 0x89 => 1000,
            _ => {
                if helvetica {
                    556
                } else {
                    500
                }
            }
        }
    }
}

/// Helvetica, ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold, ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Times-Roman, ASCII 32..=126.
#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];
