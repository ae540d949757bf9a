//! PDF composition utilities applied to a finished document.
//!
//! This crate works on an in-memory `lopdf::Document` after all content has
//! been laid out:
//! - Page access by index ([`PageCollection`])
//! - Content overlaying (footers, watermarks)
//! - Second-pass page numbering ("Page i of N")

mod error;

pub use error::ComposerError;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

/// Index-based access to the pages of a finished document.
pub trait PageCollection {
    fn page_count(&self) -> usize;

    /// The page object at 0-based `index`, in reading order.
    fn page(&self, index: usize) -> Option<ObjectId>;
}

impl PageCollection for Document {
    fn page_count(&self) -> usize {
        self.get_pages().len()
    }

    fn page(&self, index: usize) -> Option<ObjectId> {
        let number = u32::try_from(index).ok()?.checked_add(1)?;
        self.get_pages().get(&number).copied()
    }
}

/// Where and how page labels are drawn.
#[derive(Debug, Clone)]
pub struct PageStamp {
    /// Resource name of an already registered font, e.g. `F1`.
    pub font_resource: String,
    pub font_size: f32,
    /// Baseline position in PDF user space (origin bottom-left).
    pub baseline_y: f32,
    pub page_width: f32,
    /// Fill color as unit RGB.
    pub color: [f32; 3],
}

/// The label stamped on the page at 0-based `index`.
pub fn page_label(index: usize, total: usize) -> String {
    format!("Page {} of {}", index + 1, total)
}

/// Stamps `Page i of N`, centred horizontally, on every page.
///
/// `measure` returns the advance width of a label at the stamp's font size.
/// Returns the number of pages stamped.
pub fn stamp_page_numbers<F>(
    doc: &mut Document,
    stamp: &PageStamp,
    measure: F,
) -> Result<usize, ComposerError>
where
    F: Fn(&str) -> f32,
{
    let total = doc.page_count();
    for index in 0..total {
        let page_id = doc
            .page(index)
            .ok_or_else(|| ComposerError::Other(format!("Page {} disappeared", index + 1)))?;
        let label = page_label(index, total);
        let x = (stamp.page_width - measure(&label)) / 2.0;

        let [r, g, b] = stamp.color;
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![
                        Object::Name(stamp.font_resource.as_bytes().to_vec()),
                        stamp.font_size.into(),
                    ],
                ),
                Operation::new("rg", vec![r.into(), g.into(), b.into()]),
                Operation::new("Td", vec![x.into(), stamp.baseline_y.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(label.into_bytes(), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        overlay_content(doc, page_id, content.encode()?)?;
    }
    log::debug!("Stamped page numbers on {} pages", total);
    Ok(total)
}

/// Adds a new content stream to an existing page, drawn on top of it.
///
/// The existing `/Contents` entry (a single reference or an array) is turned
/// into an array with the new stream appended. Streams are concatenated when
/// read, so the new one starts with a newline to keep operators apart.
pub fn overlay_content(
    doc: &mut Document,
    page_id: ObjectId,
    content_stream: Vec<u8>,
) -> Result<(), ComposerError> {
    let mut data = Vec::with_capacity(content_stream.len() + 1);
    data.push(b'\n');
    data.extend(content_stream);
    let stream = Stream::new(dictionary! {}, data);
    let new_content_id = doc.add_object(Object::Stream(stream));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;

    match page_dict.get_mut(b"Contents") {
        Ok(contents_obj) => {
            let mut contents = match contents_obj.as_array() {
                Ok(arr) => arr.clone(),
                Err(_) => vec![contents_obj.clone()],
            };
            contents.push(Object::Reference(new_content_id));
            page_dict.set("Contents", Object::Array(contents));
        }
        Err(_) => {
            return Err(ComposerError::Other(format!(
                "Page {:?} is missing a /Contents key.",
                page_id
            )));
        }
    }

    Ok(())
}
