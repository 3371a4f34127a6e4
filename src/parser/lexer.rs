//! Lexer (tokenizer) for enumeration registry sources
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Lexical errors are not `Err` values: they are returned as
//! [`TokenKind::Error`] tokens whose lexeme holds the diagnostic message, and
//! [`Lexer::tokenize_all`] stops scanning right after the first one.

use log::debug;
use rustc_hash::FxHashMap;
use std::fmt;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Enumeration,
    TypeKeyword,
    TitleKeyword,
    IdKeyword,

    // Literals
    StringLiteral,
    IntLiteral,

    // Punctuation
    Colon,
    Semicolon,

    Error,
    EndOfFile,
}

impl TokenKind {
    /// Upper-case name used by token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Enumeration => "ENUMERATION",
            TokenKind::TypeKeyword => "TYPE",
            TokenKind::TitleKeyword => "TITLE",
            TokenKind::IdKeyword => "ID",
            TokenKind::StringLiteral => "STRING",
            TokenKind::IntLiteral => "INTEGER",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Error => "ERROR",
            TokenKind::EndOfFile => "EOF",
        }
    }

    /// `Error` and `EndOfFile` end a tokenize run.
    pub fn is_terminal(self) -> bool {
        matches!(self, TokenKind::Error | TokenKind::EndOfFile)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Enumeration => write!(f, "'enumeration'"),
            TokenKind::TypeKeyword => write!(f, "'type'"),
            TokenKind::TitleKeyword => write!(f, "'title'"),
            TokenKind::IdKeyword => write!(f, "'id'"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::IntLiteral => write!(f, "integer literal"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Error => write!(f, "lexical error"),
            TokenKind::EndOfFile => write!(f, "end of file"),
        }
    }
}

/// Identifier text recognised as a keyword. Anything else is a lexical error.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("enumeration", TokenKind::Enumeration),
    ("type", TokenKind::TypeKeyword),
    ("title", TokenKind::TitleKeyword),
    ("id", TokenKind::IdKeyword),
];

/// A single lexical unit.
///
/// For string literals `lexeme` is the text between the quotes; for
/// [`TokenKind::Error`] it is a human-readable diagnostic instead of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based line on which the token starts.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::StringLiteral => write!(f, "string literal '{}'", self.lexeme),
            TokenKind::IntLiteral => write!(f, "integer literal {}", self.lexeme),
            TokenKind::Error => write!(f, "{}", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Single-pass scanner over an in-memory source buffer.
///
/// Tokens are produced on demand by [`Lexer::next_token`]; the lexer also
/// implements [`Iterator`], yielding tokens until (and including) the first
/// `Error` or `EndOfFile`. A consumed lexer cannot be rewound; create a new
/// one to rescan.
pub struct Lexer {
    input: Vec<char>,
    start: usize,
    position: usize,
    line: usize,
    keywords: FxHashMap<&'static str, TokenKind>,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            start: 0,
            position: 0,
            line: 1,
            keywords: KEYWORDS.iter().copied().collect(),
            finished: false,
        }
    }

    /// True while the cursor has not reached the end of the buffer.
    pub fn has_more(&self) -> bool {
        self.position < self.input.len()
    }

    /// Tokenize the remaining input.
    ///
    /// Stops right after the first `Error` or `EndOfFile` token, which is kept
    /// as the last element. An empty (or already consumed) buffer yields no
    /// tokens at all.
    pub fn tokenize_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while self.has_more() {
            let token = self.next_token();
            let terminal = token.kind.is_terminal();
            tokens.push(token);

            if terminal {
                break;
            }
        }

        debug!("lexed {} tokens", tokens.len());
        tokens
    }

    /// Scan and return the next token.
    ///
    /// Once the input is exhausted every call returns `EndOfFile`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        self.start = self.position;
        let line = self.line;

        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::EndOfFile, "", line);
        };

        match ch {
            '0'..='9' => self.number_literal(line),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(line),
            '\'' => self.string_literal(line),
            ':' => self.make_token(TokenKind::Colon, line),
            ';' => self.make_token(TokenKind::Semicolon, line),
            _ => Token::new(
                TokenKind::Error,
                format!("Unexpected character: {}", ch),
                line,
            ),
        }
    }

    /// Scan a single-quoted string literal. The opening quote is already consumed.
    fn string_literal(&mut self, line: usize) -> Token {
        while let Some(ch) = self.peek() {
            if ch == '\'' {
                let value: String = self.input[self.start + 1..self.position].iter().collect();
                self.advance(); // consume closing quote
                return Token::new(TokenKind::StringLiteral, value, line);
            }
            self.advance();
        }

        Token::new(TokenKind::Error, "Unterminated string.", line)
    }

    /// Scan an unsigned decimal run. No sign, radix prefix or fraction.
    fn number_literal(&mut self, line: usize) -> Token {
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.advance();
        }

        self.make_token(TokenKind::IntLiteral, line)
    }

    fn identifier_or_keyword(&mut self, line: usize) -> Token {
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_') {
            self.advance();
        }

        let text = self.lexeme();
        match self.keywords.get(text.as_str()) {
            Some(&kind) => Token::new(kind, text, line),
            None => Token::new(
                TokenKind::Error,
                format!("Unexpected identifier: {}", text),
                line,
            ),
        }
    }

    /// Skip spaces, tabs, carriage returns and newlines.
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    fn make_token(&self, kind: TokenKind, line: usize) -> Token {
        Token::new(kind, self.lexeme(), line)
    }

    /// Source text between the token start marker and the cursor.
    fn lexeme(&self) -> String {
        self.input[self.start..self.position].iter().collect()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Consume one character, counting newlines.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
        }

        Some(ch)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind.is_terminal() {
            self.finished = true;
        }
        Some(token)
    }
}

impl std::iter::FusedIterator for Lexer {}
