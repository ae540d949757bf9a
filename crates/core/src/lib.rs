//! # quire-core
//!
//! The export layer shared by the HTTP service and the command line tool.
//!
//! - [`Exporter`]: front matter plus chapter-by-chapter rendering, skipping
//!   chapters that fail
//! - [`ExportFormat`]: the formats on offer and their MIME types
//! - [`sanitize_filename`] / [`content_disposition`]: download naming
//!
//! The renderers themselves live in `quire-render-pdf` and
//! `quire-render-docx`; they are re-exported here for convenience.

mod error;
mod exporter;
mod filename;
mod format;

pub use error::{ChapterError, ExportError};
pub use exporter::{ExportReport, Exporter, SkippedChapter, authorize};
pub use filename::{FALLBACK_FILENAME, content_disposition, sanitize_filename};
pub use format::ExportFormat;

pub use quire_markup as markup;
pub use quire_render_core as render;
pub use quire_render_docx::DocxBookRenderer;
pub use quire_render_pdf::PdfBookRenderer;
pub use quire_traits as traits;
pub use quire_types as types;
