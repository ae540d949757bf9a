//! WordprocessingML (`.docx`) output for books.
//!
//! Blocks become [`Paragraph`]s through [`DocxSink`]; [`DocxBookRenderer`]
//! adds the front matter and packages everything with [`write_package`].

mod error;
mod model;
mod package;
mod renderer;
mod sink;
mod typography;
mod xml;

pub use error::DocxError;
pub use model::{Alignment, Border, InlineImage, Paragraph, Run, RunContent};
pub use package::{MediaPart, write_package};
pub use renderer::DocxBookRenderer;
pub use sink::DocxSink;
pub use typography::{DocxTypography, EMU_PER_PIXEL};
