//! CommonMark tokenization into the flat [`Token`] stream.
//!
//! Parsing itself is delegated to `pulldown-cmark`. This module only folds its
//! event stream into the open/inline/close shape the block renderers walk.

use crate::MarkupError;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use quire_types::{InlineToken, Token};
use std::fmt::Debug;

/// Default maximum depth of nested lists, list items and block quotes.
pub const DEFAULT_NESTING_LIMIT: usize = 32;

/// Converts chapter markup into a token stream.
///
/// Implementations must be deterministic: the same input always yields the
/// same tokens.
pub trait MarkupTokenizer: Send + Sync + Debug {
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, MarkupError>;
}

/// The default tokenizer, backed by `pulldown-cmark` with plain CommonMark
/// options (no tables, footnotes or raw HTML rendering).
#[derive(Debug, Clone)]
pub struct CommonMarkTokenizer {
    nesting_limit: usize,
}

impl Default for CommonMarkTokenizer {
    fn default() -> Self {
        Self {
            nesting_limit: DEFAULT_NESTING_LIMIT,
        }
    }
}

impl CommonMarkTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nesting_limit(nesting_limit: usize) -> Self {
        Self { nesting_limit }
    }

    pub fn nesting_limit(&self) -> usize {
        self.nesting_limit
    }
}

impl MarkupTokenizer for CommonMarkTokenizer {
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, MarkupError> {
        let mut builder = TokenStreamBuilder::new(self.nesting_limit);
        for event in Parser::new_ext(source, Options::empty()) {
            builder.push(event)?;
        }
        let tokens = builder.finish()?;
        log::debug!(
            "Tokenized {} bytes of markup into {} tokens",
            source.len(),
            tokens.len()
        );
        Ok(tokens)
    }
}

struct PendingCode {
    info: Option<String>,
    content: String,
}

/// Folds parser events into tokens.
///
/// Inline events are buffered and emitted as a single [`Token::Inline`] the
/// next time a block boundary is seen.
struct TokenStreamBuilder {
    tokens: Vec<Token>,
    inline: Vec<InlineToken>,
    code: Option<PendingCode>,
    depth: usize,
    limit: usize,
    // Alt text of images is not rendered
    image_depth: usize,
}

impl TokenStreamBuilder {
    fn new(limit: usize) -> Self {
        Self {
            tokens: Vec::new(),
            inline: Vec::new(),
            code: None,
            depth: 0,
            limit,
            image_depth: 0,
        }
    }

    fn push(&mut self, event: Event<'_>) -> Result<(), MarkupError> {
        match event {
            Event::Start(tag) => self.start(tag)?,
            Event::End(tag) => self.end(tag)?,
            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.content.push_str(&text);
                } else {
                    self.push_text(&text);
                }
            }
            Event::Code(code) => self.push_inline(InlineToken::CodeInline(code.into_string())),
            // Raw HTML is shown as literal text
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_text(&html.replace('\n', " "));
            }
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            Event::Rule => {
                self.flush_inline();
                self.tokens.push(Token::Hr);
            }
            _ => {}
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) -> Result<(), MarkupError> {
        match tag {
            Tag::Paragraph | Tag::HtmlBlock => self.open(Token::ParagraphOpen),
            Tag::Heading { level, .. } => self.open(Token::HeadingOpen(level as u8)),
            Tag::BlockQuote { .. } => {
                self.enter_block()?;
                self.open(Token::BlockQuoteOpen);
            }
            Tag::List(start) => {
                self.enter_block()?;
                self.open(if start.is_some() {
                    Token::OrderedListOpen
                } else {
                    Token::BulletListOpen
                });
            }
            Tag::Item => {
                self.enter_block()?;
                self.open(Token::ListItemOpen);
            }
            Tag::CodeBlock(kind) => {
                self.flush_inline();
                let info = match kind {
                    CodeBlockKind::Indented => None,
                    CodeBlockKind::Fenced(info) => Some(info.trim().to_string()),
                };
                self.code = Some(PendingCode {
                    info,
                    content: String::new(),
                });
            }
            Tag::Emphasis => self.push_inline(InlineToken::EmOpen),
            Tag::Strong => self.push_inline(InlineToken::StrongOpen),
            Tag::Image { .. } => self.image_depth += 1,
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, tag: TagEnd) -> Result<(), MarkupError> {
        match tag {
            TagEnd::Paragraph | TagEnd::HtmlBlock => self.close(Token::ParagraphClose),
            TagEnd::Heading(_) => self.close(Token::HeadingClose),
            TagEnd::BlockQuote { .. } => {
                self.leave_block()?;
                self.close(Token::BlockQuoteClose);
            }
            TagEnd::List(ordered) => {
                self.leave_block()?;
                self.close(if ordered {
                    Token::OrderedListClose
                } else {
                    Token::BulletListClose
                });
            }
            TagEnd::Item => {
                self.leave_block()?;
                self.close(Token::ListItemClose);
            }
            TagEnd::CodeBlock => {
                let code = self.code.take().ok_or_else(|| {
                    MarkupError::Unbalanced("code block closed without being opened".into())
                })?;
                self.tokens.push(match code.info {
                    Some(info) => Token::Fence {
                        info,
                        content: code.content,
                    },
                    None => Token::CodeBlock(code.content),
                });
            }
            TagEnd::Emphasis => self.push_inline(InlineToken::EmClose),
            TagEnd::Strong => self.push_inline(InlineToken::StrongClose),
            TagEnd::Image => self.image_depth = self.image_depth.saturating_sub(1),
            _ => {}
        }
        Ok(())
    }

    fn open(&mut self, token: Token) {
        self.flush_inline();
        self.tokens.push(token);
    }

    fn close(&mut self, token: Token) {
        self.flush_inline();
        self.tokens.push(token);
    }

    fn enter_block(&mut self) -> Result<(), MarkupError> {
        self.depth += 1;
        if self.depth > self.limit {
            return Err(MarkupError::NestingTooDeep {
                depth: self.depth,
                limit: self.limit,
            });
        }
        Ok(())
    }

    fn leave_block(&mut self) -> Result<(), MarkupError> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or_else(|| MarkupError::Unbalanced("block closed at depth 0".into()))?;
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if self.image_depth > 0 || text.is_empty() {
            return;
        }
        // The parser splits text at special characters; merge the pieces back
        if let Some(InlineToken::Text(last)) = self.inline.last_mut() {
            last.push_str(text);
        } else {
            self.inline.push(InlineToken::Text(text.to_string()));
        }
    }

    fn push_inline(&mut self, token: InlineToken) {
        if self.image_depth == 0 {
            self.inline.push(token);
        }
    }

    fn flush_inline(&mut self) {
        if !self.inline.is_empty() {
            self.tokens
                .push(Token::Inline(std::mem::take(&mut self.inline)));
        }
    }

    fn finish(mut self) -> Result<Vec<Token>, MarkupError> {
        self.flush_inline();
        if self.code.is_some() {
            return Err(MarkupError::Unbalanced("unterminated code block".into()));
        }
        if self.depth != 0 {
            return Err(MarkupError::Unbalanced(format!(
                "{} block(s) left open",
                self.depth
            )));
        }
        Ok(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<Token> {
        CommonMarkTokenizer::new().tokenize(source).unwrap()
    }

    fn text(s: &str) -> InlineToken {
        InlineToken::text(s)
    }

    #[test]
    fn test_heading_and_paragraph() {
        let tokens = tokenize("# Heading\n\nSome **bold** text.");
        assert_eq!(
            tokens,
            vec![
                Token::HeadingOpen(1),
                Token::Inline(vec![text("Heading")]),
                Token::HeadingClose,
                Token::ParagraphOpen,
                Token::Inline(vec![
                    text("Some "),
                    InlineToken::StrongOpen,
                    text("bold"),
                    InlineToken::StrongClose,
                    text(" text."),
                ]),
                Token::ParagraphClose,
            ]
        );
    }

    #[test]
    fn test_heading_levels() {
        let tokens = tokenize("## Two\n\n###### Six");
        assert_eq!(tokens[0], Token::HeadingOpen(2));
        assert_eq!(tokens[3], Token::HeadingOpen(6));
    }

    #[test]
    fn test_tight_list_items_carry_inline_directly() {
        let tokens = tokenize("- one\n- two");
        assert_eq!(
            tokens,
            vec![
                Token::BulletListOpen,
                Token::ListItemOpen,
                Token::Inline(vec![text("one")]),
                Token::ListItemClose,
                Token::ListItemOpen,
                Token::Inline(vec![text("two")]),
                Token::ListItemClose,
                Token::BulletListClose,
            ]
        );
    }

    #[test]
    fn test_loose_list_items_wrap_paragraphs() {
        let tokens = tokenize("1. one\n\n2. two");
        assert_eq!(tokens[0], Token::OrderedListOpen);
        assert_eq!(tokens[1], Token::ListItemOpen);
        assert_eq!(tokens[2], Token::ParagraphOpen);
        assert_eq!(tokens.last(), Some(&Token::OrderedListClose));
    }

    #[test]
    fn test_nested_list_flushes_item_text_first() {
        let tokens = tokenize("- outer\n  - inner");
        assert_eq!(
            &tokens[..4],
            &[
                Token::BulletListOpen,
                Token::ListItemOpen,
                Token::Inline(vec![text("outer")]),
                Token::BulletListOpen,
            ]
        );
    }

    #[test]
    fn test_code_blocks() {
        let tokens = tokenize("```rust\nfn main() {}\n```\n\n    indented\n");
        assert_eq!(
            tokens,
            vec![
                Token::Fence {
                    info: "rust".to_string(),
                    content: "fn main() {}\n".to_string(),
                },
                Token::CodeBlock("indented\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_quote_rule_and_inline_code() {
        let tokens = tokenize("> quoted `code`\n\n---\n\nafter");
        assert_eq!(tokens[0], Token::BlockQuoteOpen);
        assert_eq!(
            tokens[2],
            Token::Inline(vec![
                text("quoted "),
                InlineToken::CodeInline("code".to_string())
            ])
        );
        assert_eq!(tokens[4], Token::BlockQuoteClose);
        assert_eq!(tokens[5], Token::Hr);
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        let tokens = tokenize("first\nsecond");
        assert_eq!(tokens[1], Token::Inline(vec![text("first second")]));
    }

    #[test]
    fn test_image_alt_text_is_dropped() {
        let tokens = tokenize("before ![alt *text*](a.png) after");
        assert_eq!(tokens[1], Token::Inline(vec![text("before  after")]));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{} too deep", ">".repeat(40));
        let err = CommonMarkTokenizer::new().tokenize(&deep).unwrap_err();
        assert!(matches!(err, MarkupError::NestingTooDeep { limit: 32, .. }));

        let shallow = CommonMarkTokenizer::with_nesting_limit(4);
        assert!(shallow.tokenize("> > fine").is_ok());
        assert!(shallow.tokenize("> > > > > not fine").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }
}
