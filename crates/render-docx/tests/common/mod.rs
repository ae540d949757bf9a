#![allow(dead_code)]

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quire_markup::{CommonMarkTokenizer, MarkupTokenizer};
use quire_render_core::{BookRenderer, ChapterInput, FrontMatter};
use quire_render_docx::DocxBookRenderer;
use quire_traits::{InMemoryResourceProvider, ResourceProvider};
use quire_types::{Book, BookId, Chapter, UserId};
use std::error::Error;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub type TestResult = Result<(), Box<dyn Error>>;

/// One `<w:p>` of `word/document.xml`, flattened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedParagraph {
    pub style: Option<String>,
    /// Text with `<w:br/>` as `\n`.
    pub text: String,
    pub page_break: bool,
    pub has_image: bool,
}

/// A rendered `.docx`, reopened for inspection.
pub struct GeneratedDocx {
    pub bytes: Vec<u8>,
    pub document_xml: String,
    pub paragraphs: Vec<ParsedParagraph>,
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, Box<dyn Error>> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn parse_paragraphs(xml: &str) -> Result<Vec<ParsedParagraph>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<ParsedParagraph> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => current = Some(ParsedParagraph::default()),
                b"w:t" => in_text = true,
                b"w:drawing" => {
                    if let Some(p) = current.as_mut() {
                        p.has_image = true;
                    }
                }
                _ => {}
            },
            Event::Empty(e) => {
                let Some(p) = current.as_mut() else { continue };
                match e.name().as_ref() {
                    b"w:pStyle" => p.style = attribute(&e, "w:val")?,
                    b"w:br" => {
                        if attribute(&e, "w:type")?.as_deref() == Some("page") {
                            p.page_break = true;
                        } else {
                            p.text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) if in_text => {
                if let Some(p) = current.as_mut() {
                    p.text.push_str(&t.decode()?);
                }
            }
            Event::GeneralRef(r) if in_text => {
                let entity = format!("&{};", r.decode()?);
                if let Some(p) = current.as_mut() {
                    p.text.push_str(&unescape(&entity)?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.extend(current.take()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(paragraphs)
}

impl GeneratedDocx {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn Error>> {
        let document_xml = read_part(&bytes, "word/document.xml")?;
        let paragraphs = parse_paragraphs(&document_xml)?;
        Ok(Self {
            bytes,
            document_xml,
            paragraphs,
        })
    }

    pub fn part(&self, name: &str) -> Result<String, Box<dyn Error>> {
        read_part(&self.bytes, name)
    }

    pub fn has_part(&self, name: &str) -> bool {
        ZipArchive::new(Cursor::new(&self.bytes[..]))
            .map(|mut archive| archive.by_name(name).is_ok())
            .unwrap_or(false)
    }

    /// Texts of all paragraphs that have any.
    pub fn texts(&self) -> Vec<String> {
        self.paragraphs
            .iter()
            .filter(|p| !p.text.is_empty())
            .map(|p| p.text.clone())
            .collect()
    }

    pub fn page_breaks(&self) -> usize {
        self.paragraphs.iter().filter(|p| p.page_break).count()
    }

    pub fn styled(&self, style: &str) -> Vec<String> {
        self.paragraphs
            .iter()
            .filter(|p| p.style.as_deref() == Some(style))
            .map(|p| p.text.clone())
            .collect()
    }
}

fn read_part(bytes: &[u8], name: &str) -> Result<String, Box<dyn Error>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut part = archive.by_name(name)?;
    let mut out = String::new();
    part.read_to_string(&mut out)?;
    Ok(out)
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

pub fn render_book_with(
    book: &Book,
    resources: &dyn ResourceProvider,
) -> Result<GeneratedDocx, Box<dyn Error>> {
    let tokenizer = CommonMarkTokenizer::default();
    let mut renderer = DocxBookRenderer::new();
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

    GeneratedDocx::from_bytes(renderer.finish(Vec::new())?)
}

pub fn render_book(book: &Book) -> Result<GeneratedDocx, Box<dyn Error>> {
    render_book_with(book, &InMemoryResourceProvider::new())
}
