//! SQL Lexer/Tokenizer
//!
//! Hand-written, dialect-aware lexer. Tokenization never fails: characters
//! the grammar does not know become [`TokenKind::Error`] tokens and are
//! reported by the parser at the position they occur.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
