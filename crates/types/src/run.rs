/// An immutable formatted text fragment produced by the inline run renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl RenderedRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn styled(text: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            code: false,
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: true,
            ..Default::default()
        }
    }

    /// Concatenates the text of a sequence of runs.
    pub fn join(runs: &[RenderedRun]) -> String {
        runs.iter().map(|r| r.text.as_str()).collect()
    }
}
