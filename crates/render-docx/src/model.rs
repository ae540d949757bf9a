//! A small, self-contained paragraph model of a WordprocessingML body.
//!
//! Every [`Paragraph`] carries its own formatting; nothing refers back to
//! earlier paragraphs, so a chapter can be dropped by truncating the list.

use quire_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Justified,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Justified => "both",
        }
    }
}

/// A single-line paragraph border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub color: Color,
    /// Width in eighths of a point.
    pub size: u32,
    /// Distance from the text in points.
    pub space: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Borders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
}

impl Borders {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spacing {
    pub before: Option<u32>,
    pub after: Option<u32>,
    /// Line spacing in 240ths of a line.
    pub line: Option<u32>,
}

impl Spacing {
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none() && self.line.is_none()
    }
}

/// A picture embedded inline in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Relationship id of the media part.
    pub rel_id: String,
    /// Drawing object id, unique within the document.
    pub id: u32,
    pub name: String,
    pub width_emu: u64,
    pub height_emu: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Text; `\n` becomes a line break.
    Text(String),
    PageBreak,
    Image(InlineImage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub content: RunContent,
    pub bold: bool,
    pub italic: bool,
    pub font: Option<String>,
    /// Size in half-points.
    pub size: Option<u32>,
    pub color: Option<Color>,
}

impl Run {
    fn with_content(content: RunContent) -> Self {
        Self {
            content,
            bold: false,
            italic: false,
            font: None,
            size: None,
            color: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(RunContent::Text(text.into()))
    }

    pub fn page_break() -> Self {
        Self::with_content(RunContent::PageBreak)
    }

    pub fn image(image: InlineImage) -> Self {
        Self::with_content(RunContent::Image(image))
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn font(mut self, font: &str) -> Self {
        self.font = Some(font.to_string());
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn has_properties(&self) -> bool {
        self.bold
            || self.italic
            || self.font.is_some()
            || self.size.is_some()
            || self.color.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style: Option<String>,
    pub alignment: Option<Alignment>,
    pub spacing: Spacing,
    /// Left indent in twentieths of a point.
    pub indent_left: Option<u32>,
    pub borders: Borders,
    pub shading: Option<Color>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph holding only a page break.
    pub fn page_break() -> Self {
        Self::new().run(Run::page_break())
    }

    pub fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn runs(mut self, runs: impl IntoIterator<Item = Run>) -> Self {
        self.runs.extend(runs);
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn spacing(mut self, before: Option<u32>, after: Option<u32>) -> Self {
        self.spacing.before = before;
        self.spacing.after = after;
        self
    }

    pub fn line_spacing(mut self, line: u32) -> Self {
        self.spacing.line = Some(line);
        self
    }

    pub fn indent(mut self, left: u32) -> Self {
        self.indent_left = Some(left);
        self
    }

    pub fn border_top(mut self, border: Border) -> Self {
        self.borders.top = Some(border);
        self
    }

    pub fn border_left(mut self, border: Border) -> Self {
        self.borders.left = Some(border);
        self
    }

    pub fn border_bottom(mut self, border: Border) -> Self {
        self.borders.bottom = Some(border);
        self
    }

    pub fn shading(mut self, fill: Color) -> Self {
        self.shading = Some(fill);
        self
    }

    pub fn has_properties(&self) -> bool {
        self.style.is_some()
            || self.alignment.is_some()
            || !self.spacing.is_empty()
            || self.indent_left.is_some()
            || !self.borders.is_empty()
            || self.shading.is_some()
    }

    /// The paragraph's text, with line breaks as `\n`.
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|r| match &r.content {
                RunContent::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn is_page_break(&self) -> bool {
        self.runs
            .iter()
            .any(|r| matches!(r.content, RunContent::PageBreak))
    }
}
