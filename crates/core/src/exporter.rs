use crate::error::{ChapterError, ExportError};
use crate::format::ExportFormat;
use quire_markup::{CommonMarkTokenizer, MarkupTokenizer};
use quire_render_core::{BookRenderer, ChapterInput, FrontMatter};
use quire_render_docx::DocxBookRenderer;
use quire_render_pdf::PdfBookRenderer;
use quire_traits::ResourceProvider;
use quire_types::{Book, UserId};
use std::io::Write;
use std::sync::Arc;

/// A chapter left out of an export, with the reason.
#[derive(Debug)]
pub struct SkippedChapter {
    /// 0-based position in the book.
    pub index: usize,
    pub title: String,
    pub error: ChapterError,
}

/// What an export produced.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub rendered_chapters: usize,
    pub skipped: Vec<SkippedChapter>,
}

/// Fails with [`ExportError::Forbidden`] unless `user` owns `book`.
pub fn authorize(book: &Book, user: &UserId) -> Result<(), ExportError> {
    if book.is_owned_by(user) {
        Ok(())
    } else {
        Err(ExportError::Forbidden {
            book: book.id.clone(),
            user: user.clone(),
        })
    }
}

/// Renders books into a requested format.
///
/// Chapters are isolated from each other: a chapter whose markup fails to
/// tokenize or whose blocks fail to render is logged and left out, and the
/// export carries on with the next one.
#[derive(Debug, Clone)]
pub struct Exporter<T = CommonMarkTokenizer> {
    tokenizer: T,
    resources: Arc<dyn ResourceProvider>,
}

impl Exporter<CommonMarkTokenizer> {
    pub fn new(resources: Arc<dyn ResourceProvider>) -> Self {
        Self::with_tokenizer(CommonMarkTokenizer::default(), resources)
    }
}

impl<T: MarkupTokenizer> Exporter<T> {
    pub fn with_tokenizer(tokenizer: T, resources: Arc<dyn ResourceProvider>) -> Self {
        Self {
            tokenizer,
            resources,
        }
    }

    pub fn resources(&self) -> &Arc<dyn ResourceProvider> {
        &self.resources
    }

    /// Renders `book` as `format` into `writer`.
    pub fn export<W: Write>(
        &self,
        book: &Book,
        format: ExportFormat,
        writer: W,
    ) -> Result<(W, ExportReport), ExportError> {
        match format {
            ExportFormat::Pdf => self.render_with(book, PdfBookRenderer::new(), writer),
            ExportFormat::Docx => self.render_with(book, DocxBookRenderer::new(), writer),
        }
    }

    /// Drives `renderer` through the front matter and every chapter of `book`.
    pub fn render_with<R: BookRenderer, W: Write>(
        &self,
        book: &Book,
        mut renderer: R,
        writer: W,
    ) -> Result<(W, ExportReport), ExportError> {
        log::info!(
            "Exporting book '{}' as {} ({} chapters)",
            book.id,
            renderer.format_name(),
            book.chapters.len()
        );

        let front = FrontMatter::from_book(book, self.resources.as_ref());
        renderer.begin(&front)?;

        let mut report = ExportReport::default();
        for (index, chapter) in book.chapters.iter().enumerate() {
            let title = chapter.display_title(index);
            match self.render_chapter(&mut renderer, index, &title, chapter.markup()) {
                Ok(()) => report.rendered_chapters += 1,
                Err(error) => {
                    log::warn!(
                        "Skipping chapter {} ('{}') of book '{}': {}",
                        index + 1,
                        title,
                        book.id,
                        error
                    );
                    report.skipped.push(SkippedChapter {
                        index,
                        title,
                        error,
                    });
                }
            }
        }

        let writer = renderer.finish(writer)?;
        log::info!(
            "Finished export of book '{}': {} chapters rendered, {} skipped",
            book.id,
            report.rendered_chapters,
            report.skipped.len()
        );
        Ok((writer, report))
    }

    fn render_chapter<R: BookRenderer>(
        &self,
        renderer: &mut R,
        index: usize,
        title: &str,
        markup: Option<&str>,
    ) -> Result<(), ChapterError> {
        let tokens = match markup {
            Some(markup) => self.tokenizer.tokenize(markup)?,
            None => Vec::new(),
        };
        renderer.render_chapter(ChapterInput {
            index,
            title,
            tokens: &tokens,
        })?;
        Ok(())
    }
}
