//! Enumeration registry parser
//!
//! This module transforms registry source text into [`ast::EnumEntry`] records:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → entries) with per-declaration recovery
//! - [`ast`]: Entry model
//!
//! # Source format
//!
//! ```text
//! enumeration 1:
//!   type: 'app_id'
//!   title: 'Calculator'
//!   id: 1001;
//! ```
//!
//! `type` is either `'error'` or `'app_id'`. Strings are single-quoted with no
//! escape sequences and may span lines. There are no comments.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser over a fully materialised token
//! vector. No external parser generator dependencies.

pub mod ast;
mod declarations;
pub mod lexer;
pub mod parse;

use lexer::{Lexer, Token};
use parse::{ParseOutput, Parser, ParserOptions};

/// Lex `source` up to and including its first error or end-of-file token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize_all()
}

/// Lex and parse `source` in one step.
pub fn parse_source(source: &str, options: ParserOptions) -> ParseOutput {
    Parser::with_options(tokenize(source), options).parse_with_diagnostics()
}
