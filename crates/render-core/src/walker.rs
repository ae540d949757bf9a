//! The single token walk shared by every output format.

use crate::RenderError;
use crate::sink::{BlockSink, ListKind, ListMarker};
use quire_markup::render_runs;
use quire_types::Token;

enum Frame {
    List { kind: ListKind, counter: usize },
    Item { pending: Option<ListMarker> },
    Quote,
}

/// Walks a chapter's token stream and drives `sink` block by block.
///
/// Nesting is tracked on an explicit frame stack, so tight items (inline
/// directly inside the item) and loose items (paragraphs inside the item)
/// produce the same sink calls. Ordered lists number their items from 1.
pub fn walk_tokens<S: BlockSink + ?Sized>(
    tokens: &[Token],
    sink: &mut S,
) -> Result<(), RenderError> {
    let mut walker = Walker {
        frames: Vec::new(),
        heading: None,
    };
    for token in tokens {
        walker.step(token, sink)?;
    }
    if !walker.frames.is_empty() || walker.heading.is_some() {
        return Err(RenderError::Malformed(format!(
            "{} block(s) still open at end of chapter",
            walker.frames.len() + usize::from(walker.heading.is_some())
        )));
    }
    Ok(())
}

struct Walker {
    frames: Vec<Frame>,
    heading: Option<u8>,
}

impl Walker {
    fn step<S: BlockSink + ?Sized>(
        &mut self,
        token: &Token,
        sink: &mut S,
    ) -> Result<(), RenderError> {
        match token {
            Token::HeadingOpen(level) => {
                self.flush_marker(sink)?;
                self.heading = Some(*level);
            }
            Token::HeadingClose => {
                self.heading
                    .take()
                    .ok_or_else(|| unbalanced(token))?;
            }
            Token::ParagraphOpen | Token::ParagraphClose => {}
            Token::Inline(children) => self.inline(children, sink)?,
            Token::BulletListOpen => self.open_list(ListKind::Bullet, sink)?,
            Token::OrderedListOpen => self.open_list(ListKind::Ordered, sink)?,
            Token::BulletListClose | Token::OrderedListClose => match self.frames.pop() {
                Some(Frame::List { kind, .. }) => {
                    let depth = self.list_count();
                    sink.end_list(kind, depth)?
                }
                _ => return Err(unbalanced(token)),
            },
            Token::ListItemOpen => {
                let marker = match self.frames.last_mut() {
                    Some(Frame::List { kind, counter }) => {
                        *counter += 1;
                        match kind {
                            ListKind::Bullet => ListMarker::Bullet,
                            ListKind::Ordered => ListMarker::Number(*counter),
                        }
                    }
                    _ => return Err(unbalanced(token)),
                };
                self.frames.push(Frame::Item {
                    pending: Some(marker),
                });
            }
            Token::ListItemClose => {
                self.flush_marker(sink)?;
                match self.frames.pop() {
                    Some(Frame::Item { .. }) => {}
                    _ => return Err(unbalanced(token)),
                }
            }
            Token::BlockQuoteOpen => {
                self.flush_marker(sink)?;
                self.frames.push(Frame::Quote);
            }
            Token::BlockQuoteClose => match self.frames.pop() {
                Some(Frame::Quote) => {}
                _ => return Err(unbalanced(token)),
            },
            Token::CodeBlock(content) => {
                self.flush_marker(sink)?;
                sink.code(content, None)?;
            }
            Token::Fence { info, content } => {
                self.flush_marker(sink)?;
                let info = Some(info.as_str()).filter(|i| !i.is_empty());
                sink.code(content, info)?;
            }
            Token::Hr => {
                self.flush_marker(sink)?;
                sink.rule()?;
            }
        }
        Ok(())
    }

    fn inline<S: BlockSink + ?Sized>(
        &mut self,
        children: &[quire_types::InlineToken],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        let runs = render_runs(children);

        if let Some(level) = self.heading {
            if !runs.is_empty() {
                sink.heading(level, &runs)?;
            }
            return Ok(());
        }

        let depth = self.list_depth();
        let innermost = self
            .frames
            .iter_mut()
            .rev()
            .find(|f| matches!(f, Frame::Item { .. } | Frame::Quote));
        match innermost {
            Some(Frame::Item { pending }) => {
                let marker = pending.take().unwrap_or(ListMarker::Continuation);
                if marker != ListMarker::Continuation || !runs.is_empty() {
                    sink.list_item(marker, depth, &runs)?;
                }
            }
            Some(Frame::Quote) => {
                if !runs.is_empty() {
                    sink.quote(&runs)?;
                }
            }
            _ => {
                if !runs.is_empty() {
                    sink.paragraph(&runs)?;
                }
            }
        }
        Ok(())
    }

    fn open_list<S: BlockSink + ?Sized>(
        &mut self,
        kind: ListKind,
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.flush_marker(sink)?;
        let depth = self.list_count();
        self.frames.push(Frame::List { kind, counter: 0 });
        sink.begin_list(kind, depth)
    }

    /// Emits the marker of an item whose first block is not inline text.
    fn flush_marker<S: BlockSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), RenderError> {
        let depth = self.list_depth();
        if let Some(Frame::Item { pending }) = self.frames.last_mut()
            && let Some(marker) = pending.take()
        {
            sink.list_item(marker, depth, &[])?;
        }
        Ok(())
    }

    /// Depth of the innermost open list (0 for top level, or outside lists).
    fn list_depth(&self) -> usize {
        self.list_count().saturating_sub(1)
    }

    fn list_count(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f, Frame::List { .. }))
            .count()
    }
}

fn unbalanced(token: &Token) -> RenderError {
    RenderError::Malformed(format!("unexpected {}", token.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_types::{InlineToken, RenderedRun};

    /// Records sink calls as readable strings.
    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl BlockSink for RecordingSink {
        fn heading(&mut self, level: u8, runs: &[RenderedRun]) -> Result<(), RenderError> {
            self.calls.push(format!("h{} {}", level, RenderedRun::join(runs)));
            Ok(())
        }
        fn paragraph(&mut self, runs: &[RenderedRun]) -> Result<(), RenderError> {
            self.calls.push(format!("p {}", RenderedRun::join(runs)));
            Ok(())
        }
        fn list_item(
            &mut self,
            marker: ListMarker,
            depth: usize,
            runs: &[RenderedRun],
        ) -> Result<(), RenderError> {
            self.calls.push(format!(
                "li{} [{}] {}",
                depth,
                marker.label(),
                RenderedRun::join(runs)
            ));
            Ok(())
        }
        fn quote(&mut self, runs: &[RenderedRun]) -> Result<(), RenderError> {
            self.calls.push(format!("q {}", RenderedRun::join(runs)));
            Ok(())
        }
        fn code(&mut self, content: &str, info: Option<&str>) -> Result<(), RenderError> {
            self.calls
                .push(format!("code({}) {}", info.unwrap_or("-"), content.trim_end()));
            Ok(())
        }
        fn rule(&mut self) -> Result<(), RenderError> {
            self.calls.push("hr".to_string());
            Ok(())
        }
        fn begin_list(&mut self, kind: ListKind, depth: usize) -> Result<(), RenderError> {
            self.calls.push(format!("begin {:?} {}", kind, depth));
            Ok(())
        }
        fn end_list(&mut self, kind: ListKind, depth: usize) -> Result<(), RenderError> {
            self.calls.push(format!("end {:?} {}", kind, depth));
            Ok(())
        }
    }

    fn inline(text: &str) -> Token {
        Token::Inline(vec![InlineToken::text(text)])
    }

    fn walk(tokens: &[Token]) -> Vec<String> {
        let mut sink = RecordingSink::default();
        walk_tokens(tokens, &mut sink).unwrap();
        sink.calls
    }

    #[test]
    fn test_heading_and_paragraph() {
        let calls = walk(&[
            Token::HeadingOpen(2),
            inline("Heading"),
            Token::HeadingClose,
            Token::ParagraphOpen,
            Token::Inline(vec![
                InlineToken::text("Some "),
                InlineToken::StrongOpen,
                InlineToken::text("bold"),
                InlineToken::StrongClose,
                InlineToken::text(" text."),
            ]),
            Token::ParagraphClose,
        ]);
        assert_eq!(calls, vec!["h2 Heading", "p Some bold text."]);
    }

    #[test]
    fn test_ordered_numbering_restarts_per_list() {
        let list = |items: &[&str]| {
            let mut tokens = vec![Token::OrderedListOpen];
            for item in items {
                tokens.extend([Token::ListItemOpen, inline(item), Token::ListItemClose]);
            }
            tokens.push(Token::OrderedListClose);
            tokens
        };
        let mut tokens = list(&["a", "b"]);
        tokens.push(Token::Hr);
        tokens.extend(list(&["c"]));

        assert_eq!(
            walk(&tokens),
            vec![
                "begin Ordered 0",
                "li0 [1.] a",
                "li0 [2.] b",
                "end Ordered 0",
                "hr",
                "begin Ordered 0",
                "li0 [1.] c",
                "end Ordered 0",
            ]
        );
    }

    #[test]
    fn test_loose_items_and_continuation_paragraphs() {
        let calls = walk(&[
            Token::BulletListOpen,
            Token::ListItemOpen,
            Token::ParagraphOpen,
            inline("first"),
            Token::ParagraphClose,
            Token::ParagraphOpen,
            inline("more"),
            Token::ParagraphClose,
            Token::ListItemClose,
            Token::BulletListClose,
        ]);
        assert_eq!(
            calls,
            vec!["begin Bullet 0", "li0 [•] first", "li0 [] more", "end Bullet 0"]
        );
    }

    #[test]
    fn test_nested_lists_report_depth() {
        let calls = walk(&[
            Token::BulletListOpen,
            Token::ListItemOpen,
            inline("outer"),
            Token::OrderedListOpen,
            Token::ListItemOpen,
            inline("inner"),
            Token::ListItemClose,
            Token::OrderedListClose,
            Token::ListItemClose,
            Token::BulletListClose,
        ]);
        assert_eq!(
            calls,
            vec![
                "begin Bullet 0",
                "li0 [•] outer",
                "begin Ordered 1",
                "li1 [1.] inner",
                "end Ordered 1",
                "end Bullet 0",
            ]
        );
    }

    #[test]
    fn test_item_without_text_still_gets_marker() {
        let calls = walk(&[
            Token::BulletListOpen,
            Token::ListItemOpen,
            Token::CodeBlock("x = 1\n".into()),
            Token::ListItemClose,
            Token::ListItemOpen,
            Token::ListItemClose,
            Token::BulletListClose,
        ]);
        assert_eq!(
            calls,
            vec![
                "begin Bullet 0",
                "li0 [•] ",
                "code(-) x = 1",
                "li0 [•] ",
                "end Bullet 0",
            ]
        );
    }

    #[test]
    fn test_heading_in_item_follows_its_marker() {
        let calls = walk(&[
            Token::OrderedListOpen,
            Token::ListItemOpen,
            Token::HeadingOpen(1),
            inline("Title"),
            Token::HeadingClose,
            Token::ListItemClose,
            Token::ListItemOpen,
            inline("plain"),
            Token::ListItemClose,
            Token::OrderedListClose,
        ]);
        assert_eq!(
            calls,
            vec![
                "begin Ordered 0",
                "li0 [1.] ",
                "h1 Title",
                "li0 [2.] plain",
                "end Ordered 0",
            ]
        );
    }

    #[test]
    fn test_quote_code_and_rule() {
        let calls = walk(&[
            Token::BlockQuoteOpen,
            Token::ParagraphOpen,
            inline("quoted"),
            Token::ParagraphClose,
            Token::BlockQuoteClose,
            Token::Fence {
                info: "rust".into(),
                content: "fn main() {}\n".into(),
            },
            Token::Fence {
                info: String::new(),
                content: "plain\n".into(),
            },
            Token::Hr,
        ]);
        assert_eq!(
            calls,
            vec!["q quoted", "code(rust) fn main() {}", "code(-) plain", "hr"]
        );
    }

    #[test]
    fn test_blank_blocks_are_skipped() {
        let calls = walk(&[
            Token::HeadingOpen(1),
            inline("  "),
            Token::HeadingClose,
            Token::ParagraphOpen,
            Token::Inline(vec![]),
            Token::ParagraphClose,
        ]);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_unbalanced_streams_are_rejected() {
        let mut sink = RecordingSink::default();
        assert!(matches!(
            walk_tokens(&[Token::BulletListClose], &mut sink),
            Err(RenderError::Malformed(_))
        ));
        assert!(walk_tokens(&[Token::BlockQuoteOpen], &mut sink).is_err());
        assert!(walk_tokens(&[Token::ListItemOpen], &mut sink).is_err());
    }
}
