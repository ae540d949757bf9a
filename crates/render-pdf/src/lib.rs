//! Paginated PDF output for Quire books.
//!
//! Pages are drawn with the standard 14 fonts, so no font files are embedded.
//! [`PdfBookRenderer`] lays out the front matter and chapters on a
//! [`PdfCanvas`]; page numbers are stamped in a second pass by
//! `quire-pdf-composer` once the page count is known.

mod canvas;
mod encoding;
mod flow;
mod fonts;
mod renderer;
mod sink;
mod typography;
mod xobject;

pub use canvas::{Checkpoint, PdfCanvas};
pub use encoding::to_win_ansi;
pub use flow::{Line, Span, TextStyle, break_lines, wrap_preformatted};
pub use fonts::{Font, FontFamily};
pub use renderer::PdfBookRenderer;
pub use sink::PdfSink;
pub use typography::PdfTypography;
pub use xobject::cover_xobject;
