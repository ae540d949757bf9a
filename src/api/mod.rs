pub mod export;
pub mod health;
pub mod stream;

pub use export::{export_doc, export_pdf};
pub use health::health_check;
