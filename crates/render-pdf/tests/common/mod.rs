#![allow(dead_code)]

use lopdf::Document as LopdfDocument;
use quire_markup::{CommonMarkTokenizer, MarkupTokenizer};
use quire_render_core::{BookRenderer, ChapterInput, FrontMatter};
use quire_render_pdf::PdfBookRenderer;
use quire_traits::{InMemoryResourceProvider, ResourceProvider};
use quire_types::{Book, BookId, Chapter, Token, UserId};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A rendered PDF, reloaded for inspection.
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of the 1-based `page`.
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Non-empty text lines of the 1-based `page`.
    pub fn page_lines(&self, page: u32) -> Vec<String> {
        self.page_text(page)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn all_text(&self) -> String {
        (1..=self.page_count() as u32)
            .map(|p| self.page_text(p))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn book(title: &str, chapters: Vec<Chapter>) -> Book {
    Book {
        id: BookId::from("book-1"),
        owner_id: UserId::from("user-1"),
        title: title.to_string(),
        subtitle: None,
        author: None,
        cover_image: None,
        chapters,
    }
}

pub fn chapter(title: &str, content: &str) -> Chapter {
    Chapter {
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        description: None,
    }
}

/// Renders `book` the way an export does, failing on any chapter error.
pub fn render_book_with(
    book: &Book,
    resources: &dyn ResourceProvider,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let tokenizer = CommonMarkTokenizer::default();
    let mut renderer = PdfBookRenderer::new();
    renderer.begin(&FrontMatter::from_book(book, resources))?;

    for (index, chapter) in book.chapters.iter().enumerate() {
        let title = chapter.display_title(index);
        let tokens = match chapter.markup() {
            Some(markup) => tokenizer.tokenize(markup)?,
            None => Vec::new(),
        };
        renderer.render_chapter(ChapterInput {
            index,
            title: &title,
            tokens: &tokens,
        })?;
    }

    let bytes = renderer.finish(Vec::new())?;
    GeneratedPdf::from_bytes(bytes)
}

pub fn render_book(book: &Book) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render_book_with(book, &InMemoryResourceProvider::new())
}

pub fn render_tokens(
    title: &str,
    tokens: &[Token],
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let mut renderer = PdfBookRenderer::new();
    let front = FrontMatter::from_book(&book(title, vec![]), &InMemoryResourceProvider::new());
    renderer.begin(&front)?;
    renderer.render_chapter(ChapterInput {
        index: 0,
        title: "Chapter 1",
        tokens,
    })?;
    GeneratedPdf::from_bytes(renderer.finish(Vec::new())?)
}
