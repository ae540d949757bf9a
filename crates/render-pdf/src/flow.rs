//! Greedy line breaking of styled text.
//!
//! Text is split into words at whitespace. A word may span several spans
//! (`**bold**text` is one word); the whitespace before a word keeps the style
//! of the span it came from. Words wider than a whole line are broken between
//! characters.

use crate::fonts::Font;
use quire_types::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: Font, size: f32, color: Color) -> Self {
        Self { font, size, color }
    }

    pub fn width_of(&self, text: &str) -> f32 {
        self.font.text_width(text, self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn width(&self) -> f32 {
        self.style.width_of(&self.text)
    }
}

/// One laid-out line. Adjacent text in the same style shares a span.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
    pub width: f32,
}

impl Line {
    fn push(&mut self, text: &str, style: TextStyle) {
        self.width += style.width_of(text);
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span::new(text, style)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// The largest font size on the line, or 0 for an empty line.
    pub fn max_size(&self) -> f32 {
        self.spans.iter().map(|s| s.style.size).fold(0.0, f32::max)
    }
}

#[derive(Debug, Default)]
struct Word {
    space_before: Option<TextStyle>,
    pieces: Vec<Span>,
}

impl Word {
    fn width(&self) -> f32 {
        self.pieces.iter().map(Span::width).sum()
    }
}

fn split_words(spans: &[Span]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut pending_space: Option<TextStyle> = None;
    let mut in_word = false;

    for span in spans {
        let mut rest = span.text.as_str();
        while let Some(first) = rest.chars().next() {
            let is_space = first.is_whitespace();
            let end = rest
                .find(|c: char| c.is_whitespace() != is_space)
                .unwrap_or(rest.len());
            let (segment, tail) = rest.split_at(end);
            rest = tail;

            if is_space {
                pending_space = Some(span.style);
                in_word = false;
                continue;
            }
            match words.last_mut() {
                Some(word) if in_word => word.pieces.push(Span::new(segment, span.style)),
                _ => words.push(Word {
                    space_before: pending_space.take(),
                    pieces: vec![Span::new(segment, span.style)],
                }),
            }
            in_word = true;
        }
    }
    words
}

/// Breaks `spans` into lines no wider than `max_width`.
///
/// Whitespace collapses to single spaces and never starts or ends a line.
/// Returns no lines for whitespace-only input.
pub fn break_lines(spans: &[Span], max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();

    for word in split_words(spans) {
        let word_width = word.width();
        let space = match word.space_before {
            Some(style) if !line.is_empty() => Some(style),
            _ => None,
        };
        let space_width = space.map_or(0.0, |s| s.width_of(" "));

        if !line.is_empty() && line.width + space_width + word_width > max_width {
            lines.push(std::mem::take(&mut line));
        } else if let Some(style) = space {
            line.push(" ", style);
        }

        if line.is_empty() && word_width > max_width {
            split_long_word(&word, max_width, &mut line, &mut lines);
        } else {
            for piece in &word.pieces {
                line.push(&piece.text, piece.style);
            }
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn split_long_word(word: &Word, max_width: f32, line: &mut Line, lines: &mut Vec<Line>) {
    let mut buf = [0u8; 4];
    for piece in &word.pieces {
        for c in piece.text.chars() {
            let ch: &str = c.encode_utf8(&mut buf);
            let width = piece.style.width_of(ch);
            if !line.is_empty() && line.width + width > max_width {
                lines.push(std::mem::take(line));
            }
            line.push(ch, piece.style);
        }
    }
}

/// Wraps preformatted text by characters, keeping all spaces.
///
/// Each source line yields at least one output line; tabs expand to four
/// spaces and trailing newlines are dropped.
pub fn wrap_preformatted(text: &str, style: TextStyle, max_width: f32) -> Vec<String> {
    let mut out = Vec::new();
    for source in text.trim_end_matches(['\n', '\r']).split('\n') {
        let source = source.trim_end_matches('\r').replace('\t', "    ");
        let mut current = String::new();
        let mut width = 0.0;
        for c in source.chars() {
            let mut buf = [0u8; 4];
            let w = style.width_of(c.encode_utf8(&mut buf));
            if !current.is_empty() && width + w > max_width {
                out.push(std::mem::take(&mut current));
                width = 0.0;
            }
            current.push(c);
            width += w;
        }
        out.push(current);
    }
    out
}
