//! Declaration parsing implementation
//!
//! # Grammar
//!
//! ```text
//! program     ::= declaration*
//! declaration ::= "enumeration" INT ":"
//!                 "type" ":" STRING
//!                 "title" ":" STRING
//!                 "id" ":" INT ";"
//! ```
//!
//! Fields appear in exactly this order and none is optional.

use crate::parser::ast::{EntryType, EnumEntry};
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use std::str::FromStr;

impl Parser {
    /// Parse one `enumeration ... ;` block starting at the cursor.
    pub(crate) fn parse_declaration(&mut self) -> Result<EnumEntry, ParseError> {
        self.expect(
            TokenKind::Enumeration,
            "Expected 'enumeration' at start of declaration",
        )?;
        let enum_id_token = self.expect(
            TokenKind::IntLiteral,
            "Expected declaration number after 'enumeration'",
        )?;
        let enum_id = parse_integer::<u16>(&enum_id_token, u16::MAX.into())?;
        self.expect(TokenKind::Colon, "Expected ':' after declaration number")?;

        self.expect(TokenKind::TypeKeyword, "Expected 'type' field")?;
        self.expect(TokenKind::Colon, "Expected ':' after 'type'")?;
        let type_token = self.expect(TokenKind::StringLiteral, "Expected quoted value for 'type'")?;
        let entry_type =
            EntryType::from_str(&type_token.lexeme).map_err(|_| ParseError::InvalidType {
                value: type_token.lexeme.clone(),
                line: type_token.line,
            })?;

        self.expect(TokenKind::TitleKeyword, "Expected 'title' field")?;
        self.expect(TokenKind::Colon, "Expected ':' after 'title'")?;
        let title = self
            .expect(TokenKind::StringLiteral, "Expected quoted value for 'title'")?
            .lexeme;

        self.expect(TokenKind::IdKeyword, "Expected 'id' field")?;
        self.expect(TokenKind::Colon, "Expected ':' after 'id'")?;
        let id_token = self.expect(TokenKind::IntLiteral, "Expected number for 'id'")?;
        let id = parse_integer::<u32>(&id_token, u32::MAX.into())?;

        self.expect(TokenKind::Semicolon, "Expected ';' after declaration")?;

        Ok(EnumEntry {
            enum_id,
            entry_type,
            title,
            id,
        })
    }
}

/// Plain decimal conversion; values above `max` are rejected, not wrapped.
fn parse_integer<T: FromStr>(token: &Token, max: u64) -> Result<T, ParseError> {
    token
        .lexeme
        .parse::<T>()
        .map_err(|_| ParseError::IntegerOverflow {
            lexeme: token.lexeme.clone(),
            max,
            line: token.line,
        })
}
