//! Schema Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for the schema DSL and the token
//! cursor the parser consumes.

mod cursor;
mod span;
mod token;
mod tokenizer;

pub use cursor::TokenCursor;
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
