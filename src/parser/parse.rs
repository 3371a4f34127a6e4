//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, and the error-tolerant parse loop.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, recovery, and diagnostics
//! - `declarations`: the single `enumeration ... ;` production
//!
//! # Recovery
//!
//! A failed declaration never aborts the parse. The failure is recorded as a
//! [`Diagnostic`], the cursor skips ahead to the next `enumeration` keyword
//! (or end of input), and parsing resumes from there.

use crate::parser::ast::EnumEntry;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use log::{debug, warn};
use std::fmt;
use thiserror::Error;

/// Reasons a single declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token of the wrong kind at a grammar position.
    #[error("Parse error at line {line}: {message}, found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: Token,
        message: String,
        line: usize,
    },

    /// `type:` value other than `'error'` or `'app_id'`.
    #[error("Parse error at line {line}: invalid type '{value}', expected 'error' or 'app_id'")]
    InvalidType { value: String, line: usize },

    /// Integer literal too large for its field.
    #[error("Parse error at line {line}: integer literal {lexeme} exceeds maximum of {max}")]
    IntegerOverflow {
        lexeme: String,
        max: u64,
        line: usize,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::InvalidType { line, .. }
            | ParseError::IntegerOverflow { line, .. } => *line,
        }
    }
}

/// A declaration that was dropped during recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: ParseError,
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        self.error.line()
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Self { error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// Tuning knobs for [`Parser`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Stop parsing once this many declarations have been rejected.
    /// `None` keeps going to the end of input.
    pub max_recovered_errors: Option<usize>,
}

/// Everything a parse run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// Accepted entries in declaration order.
    pub entries: Vec<EnumEntry>,
    /// One per rejected declaration, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the error limit ended the parse before end of input.
    pub truncated: bool,
}

impl ParseOutput {
    /// True when no declaration was rejected.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && !self.truncated
    }
}

/// Recursive descent parser over a materialised token sequence
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    options: ParserOptions,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    pub fn with_options(mut tokens: Vec<Token>, options: ParserOptions) -> Self {
        // Keeps `peek` total: an empty sequence reads as immediate end of input.
        if tokens.is_empty() {
            tokens.push(Token::new(TokenKind::EndOfFile, "", 1));
        }

        Self {
            tokens,
            position: 0,
            options,
        }
    }

    /// Lex `source` completely and build a parser over the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source).tokenize_all())
    }

    /// Parse every declaration, dropping malformed ones.
    pub fn parse(&mut self) -> Vec<EnumEntry> {
        self.parse_with_diagnostics().entries
    }

    /// Parse every declaration and report what was dropped.
    pub fn parse_with_diagnostics(&mut self) -> ParseOutput {
        let mut output = ParseOutput::default();

        while !self.is_at_end() {
            match self.parse_declaration() {
                Ok(entry) => {
                    debug!("parsed enumeration {} (id {})", entry.enum_id, entry.id);
                    output.entries.push(entry);
                }
                Err(err) => {
                    warn!("skipping declaration: {}", err);
                    output.diagnostics.push(Diagnostic::from(err));
                    self.synchronize();

                    if let Some(limit) = self.options.max_recovered_errors {
                        if output.diagnostics.len() >= limit && !self.is_at_end() {
                            warn!("error limit of {} reached, stopping", limit);
                            output.truncated = true;
                            break;
                        }
                    }
                }
            }
        }

        debug!(
            "parsed {} entries, {} rejected",
            output.entries.len(),
            output.diagnostics.len()
        );
        output
    }

    /// Skip to the next `enumeration` keyword or end of input.
    fn synchronize(&mut self) {
        while !self.is_at_end() && !self.check(TokenKind::Enumeration) {
            self.advance();
        }
    }

    // ===== Helper methods =====

    /// Current token; past the end this is the final token.
    pub(crate) fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.tokens
            .get(self.position)
            .is_some_and(|token| token.kind == kind)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len() || self.peek().kind == TokenKind::EndOfFile
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek().clone();
            Err(ParseError::UnexpectedToken {
                expected: kind,
                line: found.line,
                found,
                message: message.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::EntryType;

    #[test]
    fn test_parse_single_declaration() {
        let source = "enumeration 1:\n  type: 'app_id'\n  title: 'Calculator'\n  id: 1001;\n";
        let entries = Parser::from_source(source).parse();

        assert_eq!(
            entries,
            vec![EnumEntry::new(1, EntryType::AppId, "Calculator", 1001)]
        );
    }

    #[test]
    fn test_no_trailing_whitespace() {
        // No EndOfFile token is produced when the source ends on ';'
        let source = "enumeration 3: type: 'error' title: 'E' id: 9;";
        let output = Parser::from_source(source).parse_with_diagnostics();

        assert_eq!(output.entries.len(), 1);
        assert!(output.is_clean());
    }

    #[test]
    fn test_empty_token_sequence() {
        let mut parser = Parser::new(Vec::new());
        assert!(parser.is_at_end());
        assert_eq!(parser.peek().kind, TokenKind::EndOfFile);
        assert!(parser.parse().is_empty());
    }

    #[test]
    fn test_cursor_helpers() {
        let mut parser = Parser::from_source("id: ;");

        assert!(parser.check(TokenKind::IdKeyword));
        assert!(!parser.check(TokenKind::Colon));
        assert_eq!(parser.advance().kind, TokenKind::IdKeyword);
        assert_eq!(parser.advance().kind, TokenKind::Colon);
        assert_eq!(parser.advance().kind, TokenKind::Semicolon);

        // Past the end: peek returns the final token, check is false
        assert!(parser.is_at_end());
        assert_eq!(parser.peek().kind, TokenKind::Semicolon);
        assert!(!parser.check(TokenKind::Semicolon));
        assert_eq!(parser.advance().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_expect_mismatch() {
        let mut parser = Parser::from_source("title 'x'");
        let err = parser
            .expect(TokenKind::Colon, "Expected ':' after 'title'")
            .unwrap_err();

        assert_eq!(err.line(), 1);
        assert_eq!(
            err.to_string(),
            "Parse error at line 1: Expected ':' after 'title', found 'title'"
        );
    }

    #[test]
    fn test_recovery_records_diagnostic() {
        let source = "enumeration 1: type: 'app_id';\nenumeration 2: type: 'error' title: 'ok' id: 2;\n";
        let output = Parser::from_source(source).parse_with_diagnostics();

        assert_eq!(output.entries.len(), 1);
        assert_eq!(output.entries[0].enum_id, 2);
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].line(), 1);
        assert!(matches!(
            output.diagnostics[0].error,
            ParseError::UnexpectedToken {
                expected: TokenKind::TitleKeyword,
                ..
            }
        ));
        assert!(!output.is_clean());
    }

    #[test]
    fn test_error_limit_truncates() {
        let source = "enumeration 1: ; enumeration 2: ; enumeration 3: ; \
                      enumeration 4: type: 'error' title: 't' id: 4; ";
        let tokens = Lexer::new(source).tokenize_all();
        let options = ParserOptions {
            max_recovered_errors: Some(2),
        };
        let output = Parser::with_options(tokens, options).parse_with_diagnostics();

        assert_eq!(output.diagnostics.len(), 2);
        assert!(output.entries.is_empty());
        assert!(output.truncated);
    }

    #[test]
    fn test_error_limit_not_hit_at_end() {
        let options = ParserOptions {
            max_recovered_errors: Some(1),
        };
        let tokens = Lexer::new("enumeration 1: ;").tokenize_all();
        let output = Parser::with_options(tokens, options).parse_with_diagnostics();

        assert_eq!(output.diagnostics.len(), 1);
        assert!(!output.truncated);
    }
}
