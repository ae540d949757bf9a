pub mod book;
pub mod color;
pub mod ids;
pub mod run;
pub mod token;

pub use book::{Book, Chapter, PLACEHOLDER_COVER_SENTINEL, UNKNOWN_AUTHOR};
pub use color::Color;
pub use ids::{BookId, UserId};
pub use run::RenderedRun;
pub use token::{InlineToken, Token};
