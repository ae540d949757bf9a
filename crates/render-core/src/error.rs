use quire_markup::MarkupError;
use quire_traits::ResourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Document packaging error: {0}")]
    Package(String),
    #[error("Image error: {0}")]
    Image(String),
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),
    #[error("Malformed token stream: {0}")]
    Malformed(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Image(err.to_string())
    }
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
