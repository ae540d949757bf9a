use crate::canvas::PdfCanvas;
use crate::flow::TextStyle;
use crate::fonts::Font;
use crate::sink::PdfSink;
use crate::typography::PdfTypography;
use crate::xobject::cover_xobject;
use quire_pdf_composer::{PageStamp, stamp_page_numbers};
use quire_render_core::{
    BookRenderer, ChapterInput, CoverImage, FrontMatter, RenderError, walk_tokens,
};
use std::io::Write;

/// Renders a book into a paginated PDF.
///
/// Every page is buffered until [`finish`](BookRenderer::finish), which
/// stamps `Page i of N` on each page and writes the file.
#[derive(Debug)]
pub struct PdfBookRenderer {
    typography: PdfTypography,
    canvas: PdfCanvas,
}

impl Default for PdfBookRenderer {
    fn default() -> Self {
        Self::with_typography(PdfTypography::default())
    }
}

impl PdfBookRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_typography(typography: PdfTypography) -> Self {
        let canvas = PdfCanvas::new(
            typography.page_width,
            typography.page_height,
            typography.margin,
        );
        Self { typography, canvas }
    }

    pub fn page_count(&self) -> usize {
        self.canvas.page_count()
    }

    fn render_cover(&mut self, cover: &CoverImage) {
        let t = &self.typography;
        let (width, height) = cover.fit_within(
            t.content_width() * t.cover_fraction,
            t.content_height() * t.cover_fraction,
        );
        if width <= 0.0 || height <= 0.0 {
            log::warn!("Cover '{}' has no pixels, skipping", cover.source_path);
            return;
        }
        let stream = match cover_xobject(cover) {
            Ok(stream) => stream,
            Err(e) => {
                log::warn!("Could not embed cover '{}': {}", cover.source_path, e);
                return;
            }
        };

        let x = t.margin + (t.content_width() - width) / 2.0;
        let top = t.margin + (t.content_height() - height) / 2.0;
        let name = self.canvas.register_image(stream);
        self.canvas.new_page();
        self.canvas.draw_image(&name, x, top, width, height);
    }
}

impl BookRenderer for PdfBookRenderer {
    fn format_name(&self) -> &'static str {
        "pdf"
    }

    fn begin(&mut self, front: &FrontMatter) -> Result<(), RenderError> {
        if let Some(cover) = &front.cover {
            self.render_cover(cover);
        }

        let t = &self.typography;
        let title = TextStyle::new(Font::HELVETICA_BOLD, t.title_size, t.heading_color);
        let subtitle = TextStyle::new(Font::HELVETICA, t.subtitle_size, t.text_color);
        let byline = TextStyle::new(Font::HELVETICA, t.byline_size, t.text_color);

        self.canvas.new_page();
        let mut sink = PdfSink::new(&mut self.canvas, t);
        sink.centered(&front.title, title);
        sink.gap(t.title_gap);
        if let Some(text) = &front.subtitle {
            sink.centered(text, subtitle);
            sink.gap(t.subtitle_gap);
        }
        sink.centered(&front.byline, byline);
        Ok(())
    }

    fn render_chapter(&mut self, chapter: ChapterInput<'_>) -> Result<(), RenderError> {
        let checkpoint = self.canvas.checkpoint();
        let t = &self.typography;
        let title = TextStyle::new(t.heading_font, t.chapter_title_size, t.heading_color);

        self.canvas.new_page();
        let mut sink = PdfSink::new(&mut self.canvas, t);
        sink.centered(chapter.title, title);
        sink.gap(t.chapter_gap);

        match walk_tokens(chapter.tokens, &mut sink) {
            Ok(()) => {
                log::debug!(
                    "Rendered chapter {} to PDF, document now has {} pages",
                    chapter.index + 1,
                    self.canvas.page_count()
                );
                Ok(())
            }
            Err(e) => {
                self.canvas.rollback(checkpoint);
                Err(e)
            }
        }
    }

    fn finish<W: Write>(self, mut writer: W) -> Result<W, RenderError> {
        let t = self.typography;
        let mut doc = self.canvas.into_document()?;

        let stamp = PageStamp {
            font_resource: t.footer_font.resource_name(),
            font_size: t.footer_size,
            baseline_y: t.footer_baseline(),
            page_width: t.page_width,
            color: t.footer_color.to_unit_rgb(),
        };
        let footer_font = t.footer_font;
        stamp_page_numbers(&mut doc, &stamp, |label| footer_font.text_width(label, t.footer_size))
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        doc.save_to(&mut writer)?;
        Ok(writer)
    }
}
