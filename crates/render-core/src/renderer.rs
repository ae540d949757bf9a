use crate::RenderError;
use crate::cover::{CoverImage, load_cover};
use quire_traits::ResourceProvider;
use quire_types::{Book, Token};
use std::io::Write;

/// Everything rendered before the first chapter.
#[derive(Debug, Clone)]
pub struct FrontMatter {
    pub title: String,
    pub subtitle: Option<String>,
    /// `by {author}`, with the unknown-author fallback applied.
    pub byline: String,
    pub cover: Option<CoverImage>,
}

impl FrontMatter {
    pub fn from_book(book: &Book, resources: &dyn ResourceProvider) -> Self {
        Self {
            title: book.title.clone(),
            subtitle: book.display_subtitle().map(str::to_string),
            byline: book.byline(),
            cover: load_cover(book, resources),
        }
    }
}

/// One chapter, already tokenized.
#[derive(Debug, Clone, Copy)]
pub struct ChapterInput<'a> {
    /// 0-based position in the book.
    pub index: usize,
    pub title: &'a str,
    pub tokens: &'a [Token],
}

/// A book-level renderer for one output format.
///
/// Call order: [`begin`](Self::begin) once, [`render_chapter`](Self::render_chapter)
/// per chapter, then [`finish`](Self::finish).
pub trait BookRenderer {
    fn format_name(&self) -> &'static str;

    fn begin(&mut self, front: &FrontMatter) -> Result<(), RenderError>;

    /// Renders one chapter. On error, nothing of this chapter is left in the
    /// output and the renderer can continue with the next one.
    fn render_chapter(&mut self, chapter: ChapterInput<'_>) -> Result<(), RenderError>;

    /// Serializes the finished document into `writer`.
    fn finish<W: Write>(self, writer: W) -> Result<W, RenderError>
    where
        Self: Sized;
}
