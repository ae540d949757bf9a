//! Rendering abstractions shared by the Quire output formats.
//!
//! - [`walk_tokens`] drives a [`BlockSink`] from a chapter's token stream
//! - [`BookRenderer`] is the per-format book lifecycle (front matter, chapters, finish)
//! - [`load_cover`] resolves and decodes cover images
//! - [`RenderError`] is the shared error type

pub mod cover;
mod error;
mod renderer;
mod sink;
mod walker;

pub use cover::{CoverFormat, CoverImage, load_cover};
pub use error::RenderError;
pub use renderer::{BookRenderer, ChapterInput, FrontMatter};
pub use sink::{BlockSink, ListKind, ListMarker};
pub use walker::walk_tokens;
