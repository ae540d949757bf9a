use crate::fonts::Font;
use quire_types::Color;

/// Page geometry, fonts, colors and spacing of the PDF output, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfTypography {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,

    pub body_font: Font,
    pub body_size: f32,
    pub text_color: Color,

    pub heading_font: Font,
    pub heading_color: Color,
    pub heading_gap_before: f32,
    pub heading_gap_after: f32,
    pub accent_color: Color,

    pub paragraph_gap: f32,
    pub list_gap: f32,
    pub list_item_gap: f32,
    pub list_indent: f32,

    pub quote_color: Color,
    pub quote_indent: f32,
    pub quote_bar_width: f32,

    pub code_font: Font,
    pub code_size: f32,
    pub code_background: Color,
    pub code_padding: f32,

    pub rule_color: Color,
    pub rule_gap: f32,

    pub title_size: f32,
    pub title_gap: f32,
    pub subtitle_size: f32,
    pub subtitle_gap: f32,
    pub byline_size: f32,

    pub chapter_title_size: f32,
    pub chapter_gap: f32,

    pub footer_font: Font,
    pub footer_size: f32,
    pub footer_color: Color,

    /// Share of the content box a cover may occupy.
    pub cover_fraction: f32,
}

impl Default for PdfTypography {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 72.0,
            line_height: 1.35,
            body_font: Font::TIMES,
            body_size: 11.0,
            text_color: Color::gray(0x33),
            heading_font: Font::HELVETICA_BOLD,
            heading_color: Color::gray(0x1A),
            heading_gap_before: 16.0,
            heading_gap_after: 8.0,
            accent_color: Color::rgb(0x4F, 0x46, 0xE5),
            paragraph_gap: 12.0,
            list_gap: 6.0,
            list_item_gap: 2.0,
            list_indent: 18.0,
            quote_color: Color::gray(0x66),
            quote_indent: 20.0,
            quote_bar_width: 3.0,
            code_font: Font::COURIER,
            code_size: 10.0,
            code_background: Color::gray(0xF5),
            code_padding: 6.0,
            rule_color: Color::gray(0xCC),
            rule_gap: 12.0,
            title_size: 28.0,
            title_gap: 32.0,
            subtitle_size: 16.0,
            subtitle_gap: 16.0,
            byline_size: 16.0,
            chapter_title_size: 20.0,
            chapter_gap: 24.0,
            footer_font: Font::HELVETICA,
            footer_size: 9.0,
            footer_color: Color::gray(0x88),
            cover_fraction: 0.8,
        }
    }
}

impl PdfTypography {
    /// Heading size by level: 18, 16, then 14 for everything deeper.
    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1 => 18.0,
            2 => 16.0,
            _ => 14.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    pub fn line_height_for(&self, size: f32) -> f32 {
        size * self.line_height
    }

    /// Baseline of the page footer in PDF user space, inside the bottom margin.
    pub fn footer_baseline(&self) -> f32 {
        self.margin / 2.0 - self.footer_size * 0.3
    }
}
