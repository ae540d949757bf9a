use crate::RenderError;
use quire_types::RenderedRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
}

/// The marker placed before a list item's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    /// 1-based position within its ordered list.
    Number(usize),
    /// A further paragraph of an item whose marker was already emitted.
    Continuation,
}

impl ListMarker {
    /// The marker text without trailing spacing: `•`, `3.` or empty.
    pub fn label(&self) -> String {
        match self {
            ListMarker::Bullet => "\u{2022}".to_string(),
            ListMarker::Number(n) => format!("{}.", n),
            ListMarker::Continuation => String::new(),
        }
    }
}

/// Receives the blocks of one chapter, in document order, from [`walk_tokens`].
///
/// `depth` arguments are 0 for top-level lists and grow by one per nested
/// list.
///
/// [`walk_tokens`]: crate::walk_tokens
pub trait BlockSink {
    fn heading(&mut self, level: u8, runs: &[RenderedRun]) -> Result<(), RenderError>;

    fn paragraph(&mut self, runs: &[RenderedRun]) -> Result<(), RenderError>;

    fn list_item(
        &mut self,
        marker: ListMarker,
        depth: usize,
        runs: &[RenderedRun],
    ) -> Result<(), RenderError>;

    fn quote(&mut self, runs: &[RenderedRun]) -> Result<(), RenderError>;

    /// A code block; `info` is the fence info string, if any.
    fn code(&mut self, content: &str, info: Option<&str>) -> Result<(), RenderError>;

    fn rule(&mut self) -> Result<(), RenderError>;

    fn begin_list(&mut self, kind: ListKind, depth: usize) -> Result<(), RenderError>;

    fn end_list(&mut self, kind: ListKind, depth: usize) -> Result<(), RenderError>;
}
