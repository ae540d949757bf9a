//! Inline run rendering: turns the children of one [`Token::Inline`] into
//! formatted text fragments.
//!
//! [`Token::Inline`]: quire_types::Token::Inline

use quire_types::{InlineToken, RenderedRun};

/// Renders inline tokens into runs.
///
/// Formatting toggles flush the buffered text with the state in effect
/// *before* the toggle. Strong and emphasis are counted, so a nested pair
/// closing does not end the outer one. No returned run has blank text: whitespace-only text
/// is appended to the previous run, or carried into the next one when nothing
/// precedes it.
pub fn render_runs(tokens: &[InlineToken]) -> Vec<RenderedRun> {
    let mut state = RunState::default();
    for token in tokens {
        match token {
            InlineToken::Text(content) => state.buffer.push_str(content),
            InlineToken::StrongOpen => state.toggle(|s| s.strong += 1),
            InlineToken::StrongClose => state.toggle(|s| s.strong = s.strong.saturating_sub(1)),
            InlineToken::EmOpen => state.toggle(|s| s.emphasis += 1),
            InlineToken::EmClose => state.toggle(|s| s.emphasis = s.emphasis.saturating_sub(1)),
            InlineToken::CodeInline(content) => {
                state.flush();
                state.emit(content.clone(), true);
            }
        }
    }
    state.flush();
    state.runs
}

#[derive(Default)]
struct RunState {
    strong: usize,
    emphasis: usize,
    buffer: String,
    carry: String,
    runs: Vec<RenderedRun>,
}

impl RunState {
    fn toggle(&mut self, apply: impl FnOnce(&mut Self)) {
        self.flush();
        apply(self);
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        self.emit(text, false);
    }

    fn emit(&mut self, text: String, code: bool) {
        if text.trim().is_empty() {
            match self.runs.last_mut() {
                Some(previous) => previous.text.push_str(&text),
                None => self.carry.push_str(&text),
            }
            return;
        }
        let text = if self.carry.is_empty() {
            text
        } else {
            let mut carried = std::mem::take(&mut self.carry);
            carried.push_str(&text);
            carried
        };
        self.runs.push(RenderedRun {
            text,
            bold: self.strong > 0,
            italic: self.emphasis > 0,
            code,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InlineToken::*;

    fn t(s: &str) -> InlineToken {
        InlineToken::text(s)
    }

    #[test]
    fn test_flushes_with_state_prior_to_toggle() {
        let runs = render_runs(&[t("Some "), StrongOpen, t("bold"), StrongClose, t(" text.")]);
        assert_eq!(
            runs,
            vec![
                RenderedRun::plain("Some "),
                RenderedRun::styled("bold", true, false),
                RenderedRun::plain(" text."),
            ]
        );
    }

    #[test]
    fn test_nested_emphasis() {
        let runs = render_runs(&[StrongOpen, t("a"), EmOpen, t("b"), EmClose, StrongClose]);
        assert_eq!(
            runs,
            vec![
                RenderedRun::styled("a", true, false),
                RenderedRun::styled("b", true, true),
            ]
        );
    }

    #[test]
    fn test_nested_strong_keeps_outer_bold() {
        let runs = render_runs(&[
            StrongOpen,
            t("a "),
            StrongOpen,
            t("b"),
            StrongClose,
            t(" c"),
            StrongClose,
            t(" d"),
        ]);
        assert_eq!(
            runs,
            vec![
                RenderedRun::styled("a ", true, false),
                RenderedRun::styled("b", true, false),
                RenderedRun::styled(" c", true, false),
                RenderedRun::plain(" d"),
            ]
        );
    }

    #[test]
    fn test_inline_code_is_its_own_run() {
        let runs = render_runs(&[t("call "), CodeInline("f()".into()), t(" now")]);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1], RenderedRun::code("f()"));
        assert_eq!(RenderedRun::join(&runs), "call f() now");
    }

    #[test]
    fn test_whitespace_between_styled_words_is_kept() {
        let runs = render_runs(&[
            StrongOpen,
            t("one"),
            StrongClose,
            t(" "),
            EmOpen,
            t("two"),
            EmClose,
        ]);
        assert_eq!(
            runs,
            vec![
                RenderedRun::styled("one ", true, false),
                RenderedRun::styled("two", false, true),
            ]
        );
    }

    #[test]
    fn test_leading_whitespace_is_carried_forward() {
        let runs = render_runs(&[t("  "), StrongOpen, t("x"), StrongClose]);
        assert_eq!(runs, vec![RenderedRun::styled("  x", true, false)]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(render_runs(&[]).is_empty());
        assert!(render_runs(&[t("   "), StrongOpen, StrongClose]).is_empty());
    }

    #[test]
    fn test_no_run_is_blank() {
        let runs = render_runs(&[t("a"), EmOpen, t(" "), EmClose, t(" b"), CodeInline(" ".into())]);
        assert!(runs.iter().all(|r| !r.text.trim().is_empty()));
        assert_eq!(RenderedRun::join(&runs), "a  b ");
    }
}
