//! Token types for the schema lexer.

use super::Span;

/// The kind of token.
///
/// The DSL has no reserved words at the lexical level: directives such as
/// `field` or `type` are plain [`TokenKind::Word`]s and are interpreted by the
/// parser depending on where they appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare word (e.g. `field`, `user_id`, `42`)
    Word(String),
    /// Quoted string with the quotes removed (e.g. `"hello"`); may be empty
    Str(String),
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
}

impl TokenKind {
    /// Returns the source text this kind stands for.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Word(s) | Self::Str(s) => s,
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the token text (quotes stripped for strings).
    #[must_use]
    pub fn text(&self) -> &str {
        self.kind.text()
    }

    /// Returns true for a token without any text, i.e. `""`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(&self.kind, TokenKind::Str(s) if s.is_empty())
    }

    /// Returns true if this is the bare word `word`.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w == word)
    }

    /// Returns the text of a word or non-empty string token.
    ///
    /// Delimiters and empty strings cannot name anything and yield `None`.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(s) => Some(s),
            TokenKind::Str(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Returns the text of a word or string token, including empty strings.
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(s) | TokenKind::Str(s) => Some(s),
            _ => None,
        }
    }
}
