use crate::model::{Alignment, Border, InlineImage, Paragraph, Run};
use crate::package::{MediaPart, write_package};
use crate::sink::DocxSink;
use crate::typography::{DocxTypography, EMU_PER_PIXEL};
use quire_render_core::{
    BookRenderer, ChapterInput, CoverImage, FrontMatter, RenderError, walk_tokens,
};
use std::io::{Cursor, Write};

/// Renders a book into a `.docx` package.
///
/// Paragraphs accumulate in memory; [`finish`](BookRenderer::finish) zips
/// them together with styles and media.
#[derive(Debug, Default)]
pub struct DocxBookRenderer {
    typography: DocxTypography,
    paragraphs: Vec<Paragraph>,
    media: Vec<MediaPart>,
}

impl DocxBookRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_typography(typography: DocxTypography) -> Self {
        Self {
            typography,
            ..Self::default()
        }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    fn add_cover(&mut self, cover: &CoverImage) {
        // rId1 belongs to the styles part.
        let rel_id = format!("rId{}", self.media.len() + 2);
        let extension = cover.format.extension();
        let (width_px, height_px) = self.typography.cover_size_px;

        self.media.push(MediaPart {
            rel_id: rel_id.clone(),
            file_name: format!("cover.{}", extension),
            extension,
            content_type: cover.format.mime_type(),
            data: cover.data.clone(),
        });

        let image = InlineImage {
            rel_id,
            id: self.media.len() as u32,
            name: "Cover".to_string(),
            width_emu: u64::from(width_px) * EMU_PER_PIXEL,
            height_emu: u64::from(height_px) * EMU_PER_PIXEL,
        };
        self.paragraphs.push(Paragraph::new().spacing(Some(1000), None));
        self.paragraphs.push(
            Paragraph::new()
                .align(Alignment::Center)
                .spacing(Some(200), Some(400))
                .run(Run::image(image)),
        );
        self.paragraphs.push(Paragraph::page_break());
    }

    fn title_run(&self, text: &str, size: u32) -> Run {
        Run::text(text)
            .bold(true)
            .font(&self.typography.heading_font)
            .size(size)
    }
}

impl BookRenderer for DocxBookRenderer {
    fn format_name(&self) -> &'static str {
        "docx"
    }

    fn begin(&mut self, front: &FrontMatter) -> Result<(), RenderError> {
        if let Some(cover) = &front.cover {
            self.add_cover(cover);
        }

        let t = &self.typography;
        let title = Paragraph::new()
            .align(Alignment::Center)
            .spacing(Some(2000), Some(400))
            .run(self.title_run(&front.title, t.title_size).color(t.title_color));
        let subtitle = front.subtitle.as_deref().map(|text| {
            Paragraph::new()
                .align(Alignment::Center)
                .spacing(None, Some(400))
                .run(self.title_run(text, t.subtitle_size).color(t.subtitle_color))
        });
        let byline = Paragraph::new()
            .align(Alignment::Center)
            .spacing(Some(200), None)
            .run(
                Run::text(front.byline.as_str())
                    .font(&t.body_font)
                    .size(t.byline_size)
                    .color(t.byline_color),
            );
        let ornament = Paragraph::new()
            .align(Alignment::Center)
            .spacing(Some(400), None)
            .border_bottom(Border {
                color: t.accent_color,
                size: 6,
                space: 1,
            });

        self.paragraphs.push(title);
        self.paragraphs.extend(subtitle);
        self.paragraphs.push(byline);
        self.paragraphs.push(ornament);
        Ok(())
    }

    fn render_chapter(&mut self, chapter: ChapterInput<'_>) -> Result<(), RenderError> {
        let mark = self.paragraphs.len();
        let t = &self.typography;

        if chapter.index > 0 {
            self.paragraphs.push(Paragraph::page_break());
        }
        self.paragraphs.push(
            Paragraph::new()
                .spacing(Some(t.chapter_before), Some(t.chapter_after))
                .run(
                    Run::text(chapter.title)
                        .bold(true)
                        .font(&t.heading_font)
                        .size(t.chapter_title_size)
                        .color(t.title_color),
                ),
        );

        let mut sink = DocxSink::new(&mut self.paragraphs, t);
        if let Err(e) = walk_tokens(chapter.tokens, &mut sink) {
            self.paragraphs.truncate(mark);
            return Err(e);
        }
        log::debug!(
            "Rendered chapter {} to docx, {} paragraphs so far",
            chapter.index + 1,
            self.paragraphs.len()
        );
        Ok(())
    }

    fn finish<W: Write>(self, mut writer: W) -> Result<W, RenderError> {
        let package = write_package(
            &self.paragraphs,
            &self.media,
            &self.typography,
            Cursor::new(Vec::new()),
        )?;
        writer.write_all(package.get_ref())?;
        Ok(writer)
    }
}
