//! Index-addressable cursor over a tokenized schema source.

use super::{Span, Token};

/// Forward cursor over pre-tokenized input with a single-step back-off.
///
/// `next` consumes the token under the cursor, `prev` un-consumes the most
/// recently consumed one so that the following `next` yields it again.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
    /// Byte offset used for diagnostics once all tokens are consumed.
    end: usize,
}

impl TokenCursor {
    /// Creates a cursor positioned before the first token.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(0, |t| t.span.end);
        Self {
            tokens,
            pos: 0,
            end,
        }
    }

    /// Returns true if at least one more token can be consumed.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Consumes and returns the next token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Steps back one position and returns the token the next call to
    /// [`TokenCursor::next`] will yield again.
    pub fn prev(&mut self) -> Option<&Token> {
        self.pos = self.pos.checked_sub(1)?;
        self.tokens.get(self.pos)
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the index of the next token to be consumed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns an empty span right after the last token of the input.
    #[must_use]
    pub const fn eof_span(&self) -> Span {
        Span::point(self.end)
    }
}
