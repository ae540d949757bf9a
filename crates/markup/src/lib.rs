//! Chapter markup handling for the Quire exporters.
//!
//! - [`MarkupTokenizer`] / [`CommonMarkTokenizer`]: markup text to a
//!   [`Token`](quire_types::Token) stream
//! - [`render_runs`]: inline tokens to formatted [`RenderedRun`](quire_types::RenderedRun)s

mod error;
pub mod inline;
pub mod tokenizer;

pub use error::MarkupError;
pub use inline::render_runs;
pub use tokenizer::{CommonMarkTokenizer, DEFAULT_NESTING_LIMIT, MarkupTokenizer};
