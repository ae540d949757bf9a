use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("Block nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    #[error("Unbalanced markup structure: {0}")]
    Unbalanced(String),

    #[error("{0}")]
    Other(String),
}
