//! The token contract between the markup tokenizer and the block renderers.
//!
//! Tokens form a flat, positionally significant stream. Every block-level
//! `*Open` token has a matching `*Close`; between them sit either an
//! [`Token::Inline`] (headings, paragraphs, tight list items) or further
//! block tokens (loose list items, quotes, nested lists). Renderers must
//! track nesting themselves instead of assuming fixed offsets.

/// One block-level unit of parsed markup structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Heading of level 1 to 6.
    HeadingOpen(u8),
    HeadingClose,
    ParagraphOpen,
    ParagraphClose,
    /// The inline children of the enclosing heading, paragraph, or list item.
    Inline(Vec<InlineToken>),
    BulletListOpen,
    BulletListClose,
    OrderedListOpen,
    OrderedListClose,
    ListItemOpen,
    ListItemClose,
    BlockQuoteOpen,
    BlockQuoteClose,
    /// Indented code block.
    CodeBlock(String),
    /// Fenced code block with its (possibly empty) info string.
    Fence { info: String, content: String },
    /// Thematic break.
    Hr,
}

/// One inline unit inside a [`Token::Inline`].
///
/// Open/close pairs of the same attribute are balanced within one parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineToken {
    Text(String),
    StrongOpen,
    StrongClose,
    EmOpen,
    EmClose,
    CodeInline(String),
}

impl Token {
    /// Returns true for tokens that open a nesting level.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            Token::HeadingOpen(_)
                | Token::ParagraphOpen
                | Token::BulletListOpen
                | Token::OrderedListOpen
                | Token::ListItemOpen
                | Token::BlockQuoteOpen
        )
    }

    /// Returns true for tokens that close a nesting level.
    pub fn is_close(&self) -> bool {
        matches!(
            self,
            Token::HeadingClose
                | Token::ParagraphClose
                | Token::BulletListClose
                | Token::OrderedListClose
                | Token::ListItemClose
                | Token::BlockQuoteClose
        )
    }

    /// A short markdown-it style name, used in log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::HeadingOpen(_) => "heading_open",
            Token::HeadingClose => "heading_close",
            Token::ParagraphOpen => "paragraph_open",
            Token::ParagraphClose => "paragraph_close",
            Token::Inline(_) => "inline",
            Token::BulletListOpen => "bullet_list_open",
            Token::BulletListClose => "bullet_list_close",
            Token::OrderedListOpen => "ordered_list_open",
            Token::OrderedListClose => "ordered_list_close",
            Token::ListItemOpen => "list_item_open",
            Token::ListItemClose => "list_item_close",
            Token::BlockQuoteOpen => "blockquote_open",
            Token::BlockQuoteClose => "blockquote_close",
            Token::CodeBlock(_) => "code_block",
            Token::Fence { .. } => "fence",
            Token::Hr => "hr",
        }
    }
}

impl InlineToken {
    pub fn text(content: impl Into<String>) -> Self {
        InlineToken::Text(content.into())
    }
}
