use quire_render_core::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Invalid document: {0}")]
    Invalid(String),
}

impl From<DocxError> for RenderError {
    fn from(err: DocxError) -> Self {
        match err {
            DocxError::Io(e) => RenderError::Io(e),
            other => RenderError::Package(other.to_string()),
        }
    }
}
