use quire_types::Color;

/// Fonts, colors and spacing of the `.docx` output.
///
/// Sizes are in half-points and spacing in twentieths of a point, the units
/// WordprocessingML uses.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxTypography {
    pub body_font: String,
    pub heading_font: String,
    pub code_font: String,

    pub body_size: u32,
    pub code_size: u32,
    pub title_size: u32,
    pub subtitle_size: u32,
    pub byline_size: u32,
    pub chapter_title_size: u32,
    /// Heading sizes for levels 1, 2 and 3+.
    pub heading_sizes: [u32; 3],

    pub title_color: Color,
    pub subtitle_color: Color,
    pub byline_color: Color,
    pub quote_color: Color,
    pub code_color: Color,
    pub code_shading: Color,
    pub accent_color: Color,
    pub rule_color: Color,

    pub paragraph_spacing: u32,
    pub line_spacing: u32,
    pub heading_before: u32,
    pub heading_after: u32,
    pub chapter_before: u32,
    pub chapter_after: u32,
    pub list_item_spacing: u32,
    pub list_end_spacing: u32,
    pub list_indent: u32,
    pub quote_indent: u32,

    pub page_width: u32,
    pub page_height: u32,
    pub page_margin: u32,

    /// Display size of the cover image, in pixels.
    pub cover_size_px: (u32, u32),
}

impl Default for DocxTypography {
    fn default() -> Self {
        Self {
            body_font: "Charter".to_string(),
            heading_font: "Inter".to_string(),
            code_font: "Courier New".to_string(),
            body_size: 24,
            code_size: 20,
            title_size: 64,
            subtitle_size: 40,
            byline_size: 36,
            chapter_title_size: 48,
            heading_sizes: [40, 36, 32],
            title_color: Color::rgb(0x1A, 0x20, 0x2C),
            subtitle_color: Color::rgb(0x4A, 0x55, 0x68),
            byline_color: Color::rgb(0x2D, 0x37, 0x48),
            quote_color: Color::gray(0x66),
            code_color: Color::gray(0x33),
            code_shading: Color::gray(0xF5),
            accent_color: Color::rgb(0x4F, 0x46, 0xE5),
            rule_color: Color::gray(0xCC),
            paragraph_spacing: 200,
            line_spacing: 360,
            heading_before: 300,
            heading_after: 150,
            chapter_before: 400,
            chapter_after: 300,
            list_item_spacing: 50,
            list_end_spacing: 100,
            list_indent: 720,
            quote_indent: 720,
            page_width: 12240,
            page_height: 15840,
            page_margin: 1440,
            cover_size_px: (400, 550),
        }
    }
}

impl DocxTypography {
    pub fn heading_size(&self, level: u8) -> u32 {
        match level {
            1 => self.heading_sizes[0],
            2 => self.heading_sizes[1],
            _ => self.heading_sizes[2],
        }
    }

    /// Paragraph style id for a heading level; levels past 3 share `Heading3`.
    pub fn heading_style(level: u8) -> String {
        format!("Heading{}", level.clamp(1, 3))
    }
}

/// English Metric Units per pixel at 96 DPI.
pub const EMU_PER_PIXEL: u64 = 9525;
