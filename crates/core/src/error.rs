//! Errors raised by an export, before or during rendering.

use quire_markup::MarkupError;
use quire_render_core::RenderError;
use quire_types::{BookId, UserId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Book '{0}' not found")]
    NotFound(BookId),

    #[error("User '{user}' may not export book '{book}'")]
    Forbidden { book: BookId, user: UserId },

    #[error("Unknown export format '{0}'")]
    UnknownFormat(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single chapter was left out of an export.
#[derive(Error, Debug)]
pub enum ChapterError {
    #[error("markup could not be tokenized: {0}")]
    Markup(#[from] MarkupError),

    #[error("chapter could not be rendered: {0}")]
    Render(#[from] RenderError),
}
