//! Schema tokenizer implementation.

use super::{Span, Token, TokenKind};
use crate::error::LexError;

/// Characters that always form a token of their own.
const fn is_delimiter(c: char) -> bool {
    matches!(c, '{' | '}' | '(' | ')' | ',')
}

/// A lexer that splits schema source text into tokens.
///
/// Whitespace separates tokens and is dropped, as are `//` line comments and
/// `/* */` block comments. The delimiters `{ } ( ) ,` are tokens by
/// themselves, `"..."` is a string token and everything else is a word.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some('/') && matches!(self.peek_next(), Some('/' | '*'))
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('/') && self.peek_next() == Some('/') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let comment_start = self.pos;
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => {
                            return Err(LexError::UnterminatedComment {
                                span: Span::new(comment_start, self.pos),
                            });
                        }
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Scans a bare word.
    fn scan_word(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !is_delimiter(c) && c != '"')
            && !self.at_comment()
        {
            self.advance();
        }
        let text = &self.input[self.start..self.pos];
        self.make_token(TokenKind::Word(text.to_string()))
    }

    /// Scans a string literal; the opening quote is already consumed.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('"') => return Ok(self.make_token(TokenKind::Str(value))),
                Some('\\') => match self.advance() {
                    Some(c @ ('"' | '\\')) => value.push(c),
                    Some(c) => {
                        value.push('\\');
                        value.push(c);
                    }
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }

        Err(LexError::UnterminatedString {
            span: self.make_span(),
        })
    }

    /// Scans the next token, returning `None` at the end of input.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for unterminated strings or block comments.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let token = match c {
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            '"' => self.scan_string()?,
            _ => self.scan_word(),
        };
        Ok(Some(token))
    }

    /// Tokenizes the entire input.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap_or_else(|e| panic!("Failed to tokenize: {input}\nError: {e}"))
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn word(s: &str) -> TokenKind {
        TokenKind::Word(String::from(s))
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("   \n\t  ").is_empty());
    }

    #[test]
    fn test_single_line_comment() {
        assert_eq!(
            token_kinds("field // this is a comment\nid"),
            vec![word("field"), word("id")]
        );
    }

    #[test]
    fn test_multi_line_comment() {
        assert_eq!(
            token_kinds("field /* a\n comment */ id"),
            vec![word("field"), word("id")]
        );
    }

    #[test]
    fn test_comment_directly_after_word() {
        assert_eq!(token_kinds("id// trailing"), vec![word("id")]);
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            token_kinds("{ } ( ) ,"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
            ]
        );
    }

    #[test]
    fn test_delimiters_split_words() {
        assert_eq!(
            token_kinds("(a,b)unique"),
            vec![
                TokenKind::LeftParen,
                word("a"),
                TokenKind::Comma,
                word("b"),
                TokenKind::RightParen,
                word("unique"),
            ]
        );
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(
            token_kinds(r#"default "hello world""#),
            vec![word("default"), TokenKind::Str(String::from("hello world"))]
        );
    }

    #[test]
    fn test_empty_string_literal() {
        let tokens = tokenize(r#"( a, "" )"#);
        assert!(tokens[3].is_empty());
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            token_kinds(r#""a \"quoted\" \\ value""#),
            vec![TokenKind::Str(String::from(r#"a "quoted" \ value"#))]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("default \"abc").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedString {
                span: Span::new(8, 12)
            }
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let err = Lexer::new("field /* never closed").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedComment { .. }));
    }

    #[test]
    fn test_table_definition() {
        assert_eq!(
            token_kinds("table user { field id { type long } }"),
            vec![
                word("table"),
                word("user"),
                TokenKind::LeftBrace,
                word("field"),
                word("id"),
                TokenKind::LeftBrace,
                word("type"),
                word("long"),
                TokenKind::RightBrace,
                TokenKind::RightBrace,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("table user{");
        assert_eq!(tokens[0].span, Span::new(0, 5));
        assert_eq!(tokens[1].span, Span::new(6, 10));
        assert_eq!(tokens[2].span, Span::new(10, 11));
    }
}
