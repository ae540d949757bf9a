//! A page-flowing drawing surface that buffers every page in memory.
//!
//! Positions passed in and out of the canvas are measured from the top of the
//! page; they are flipped into PDF user space when operations are emitted.

use crate::encoding::to_win_ansi;
use crate::flow::Span;
use crate::fonts::Font;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};
use quire_render_core::RenderError;
use quire_types::Color;

const EPSILON: f32 = 0.01;

/// A saved canvas position that later output can be rolled back to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pages: usize,
    ops_on_last_page: usize,
    images: usize,
    cursor_y: f32,
}

#[derive(Debug)]
struct ImageXObject {
    name: String,
    stream: Stream,
}

#[derive(Debug)]
pub struct PdfCanvas {
    page_width: f32,
    page_height: f32,
    margin: f32,
    pages: Vec<Vec<Operation>>,
    images: Vec<ImageXObject>,
    cursor_y: f32,
}

impl PdfCanvas {
    pub fn new(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            page_width,
            page_height,
            margin,
            pages: Vec::new(),
            images: Vec::new(),
            cursor_y: margin,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// The lowest position content may reach.
    pub fn bottom(&self) -> f32 {
        self.page_height - self.margin
    }

    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_y = self.margin;
    }

    /// True when nothing has been placed on the current page yet.
    pub fn at_page_top(&self) -> bool {
        self.cursor_y <= self.margin + EPSILON
    }

    /// Starts a new page unless `height` still fits below the cursor.
    ///
    /// Content taller than a whole page is placed at the top of a page and
    /// allowed to overflow.
    pub fn ensure_space(&mut self, height: f32) {
        if self.pages.is_empty() {
            self.new_page();
        } else if self.cursor_y + height > self.bottom() + EPSILON && !self.at_page_top() {
            self.new_page();
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor_y += dy;
    }

    /// Vertical space between blocks, dropped at the top of a page.
    pub fn gap(&mut self, dy: f32) {
        if !self.at_page_top() {
            self.cursor_y = (self.cursor_y + dy).min(self.bottom());
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pages: self.pages.len(),
            ops_on_last_page: self.pages.last().map_or(0, Vec::len),
            images: self.images.len(),
            cursor_y: self.cursor_y,
        }
    }

    /// Discards everything drawn since `checkpoint` was taken.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.pages.truncate(checkpoint.pages);
        if let Some(last) = self.pages.last_mut() {
            last.truncate(checkpoint.ops_on_last_page);
        }
        self.images.truncate(checkpoint.images);
        self.cursor_y = checkpoint.cursor_y;
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.new_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn flip_y(&self, y: f32) -> f32 {
        self.page_height - y
    }

    /// Shows text on one baseline.
    ///
    /// Each segment starts at its own x position; the spans of a segment follow
    /// each other. All segments share one text object so text extraction sees
    /// them as a single line.
    pub fn show_text(&mut self, baseline: f32, segments: &[(f32, &[Span])]) {
        if segments.iter().all(|(_, spans)| spans.is_empty()) {
            return;
        }
        let pdf_y = self.flip_y(baseline);
        let mut ops = vec![Operation::new("BT", vec![])];
        let mut current: Option<(Font, f32)> = None;
        let mut color: Option<Color> = None;
        let mut line_x: Option<f32> = None;

        for (x, spans) in segments {
            match line_x {
                None => ops.push(Operation::new("Td", vec![(*x).into(), pdf_y.into()])),
                Some(previous) => {
                    ops.push(Operation::new("Td", vec![(*x - previous).into(), 0.into()]))
                }
            }
            line_x = Some(*x);

            for span in *spans {
                let style = span.style;
                if current != Some((style.font, style.size)) {
                    ops.push(Operation::new(
                        "Tf",
                        vec![
                            Object::Name(style.font.resource_name().into_bytes()),
                            style.size.into(),
                        ],
                    ));
                    current = Some((style.font, style.size));
                }
                if color != Some(style.color) {
                    let [r, g, b] = style.color.to_unit_rgb();
                    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
                    color = Some(style.color);
                }
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(to_win_ansi(&span.text), StringFormat::Literal)],
                ));
            }
        }
        ops.push(Operation::new("ET", vec![]));
        self.ops().extend(ops);
    }

    pub fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Color) {
        let [r, g, b] = color.to_unit_rgb();
        let y = self.flip_y(top + height);
        self.ops().extend([
            Operation::new("q", vec![]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let [r, g, b] = color.to_unit_rgb();
        let (y1, y2) = (self.flip_y(from.1), self.flip_y(to.1));
        self.ops().extend([
            Operation::new("q", vec![]),
            Operation::new("w", vec![width.into()]),
            Operation::new("RG", vec![r.into(), g.into(), b.into()]),
            Operation::new("m", vec![from.0.into(), y1.into()]),
            Operation::new("l", vec![to.0.into(), y2.into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Registers an image XObject and returns its resource name.
    pub fn register_image(&mut self, stream: Stream) -> String {
        let name = format!("Im{}", self.images.len() + 1);
        self.images.push(ImageXObject {
            name: name.clone(),
            stream,
        });
        name
    }

    pub fn draw_image(&mut self, name: &str, x: f32, top: f32, width: f32, height: f32) {
        let y = self.flip_y(top + height);
        self.ops().extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Builds the document: one shared resource dictionary with all fonts and
    /// images, one content stream per page.
    pub fn into_document(mut self) -> Result<Document, RenderError> {
        if self.pages.is_empty() {
            self.new_page();
        }
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for font in Font::ALL {
            font_dict.set(
                font.resource_name(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.base_font_name(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        let mut xobject_dict = Dictionary::new();
        for image in self.images {
            let id = doc.add_object(image.stream);
            xobject_dict.set(image.name, id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => font_dict,
            "XObject" => xobject_dict,
        });

        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            self.page_width.into(),
            self.page_height.into(),
        ];
        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let encoded = Content { operations }.encode()?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }
            .into(),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::TextStyle;

    fn canvas() -> PdfCanvas {
        PdfCanvas::new(612.0, 792.0, 72.0)
    }

    #[test]
    fn test_ensure_space_breaks_pages() {
        let mut c = canvas();
        c.ensure_space(10.0);
        assert_eq!(c.page_count(), 1);
        c.advance(640.0);
        c.ensure_space(10.0);
        assert_eq!(c.page_count(), 2);
        assert!(c.at_page_top());
    }

    #[test]
    fn test_oversized_content_does_not_loop() {
        let mut c = canvas();
        c.ensure_space(1000.0);
        c.ensure_space(1000.0);
        assert_eq!(c.page_count(), 1);
    }

    #[test]
    fn test_gap_is_dropped_at_page_top() {
        let mut c = canvas();
        c.new_page();
        c.gap(24.0);
        assert_eq!(c.cursor_y(), 72.0);
        c.advance(10.0);
        c.gap(24.0);
        assert_eq!(c.cursor_y(), 106.0);
    }

    #[test]
    fn test_rollback_discards_pages_and_operations() {
        let mut c = canvas();
        let style = TextStyle::new(Font::TIMES, 11.0, Color::BLACK);
        let kept = [Span::new("kept", style)];
        c.show_text(100.0, &[(72.0, &kept[..])]);
        let checkpoint = c.checkpoint();

        let dropped = [Span::new("dropped", style)];
        c.advance(20.0);
        c.show_text(120.0, &[(72.0, &dropped[..])]);
        c.new_page();
        c.register_image(Stream::new(dictionary! {}, vec![]));
        c.rollback(checkpoint);

        assert_eq!(c.page_count(), 1);
        assert_eq!(c.pages[0].len(), checkpoint.ops_on_last_page);
        assert!(c.images.is_empty());
        assert_eq!(c.cursor_y(), 72.0);
    }

    #[test]
    fn test_document_has_shared_resources() {
        let mut c = canvas();
        let style = TextStyle::new(Font::HELVETICA_BOLD, 20.0, Color::BLACK);
        let spans = [Span::new("Hello", style)];
        c.show_text(100.0, &[(72.0, &spans[..])]);
        c.new_page();
        let doc = c.into_document().unwrap();

        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);
        let first = pages[&1];
        let fonts = doc.get_page_fonts(first).unwrap();
        assert_eq!(fonts.len(), 12);
        assert_eq!(doc.extract_text(&[1]).unwrap().trim(), "Hello");
    }
}
