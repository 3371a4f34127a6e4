//! Property-based tests for the lexer and parser
//!
//! Arbitrary input must never panic the pipeline, and generated well-formed
//! declarations must come back out unchanged and in order.

use enumconf::parser::ast::{EntryType, EnumEntry};
use enumconf::parser::lexer::{Lexer, TokenKind};
use enumconf::parser::parse::Parser;
use proptest::prelude::*;

fn entry_type() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Error), Just(EntryType::AppId)]
}

fn entry() -> impl Strategy<Value = EnumEntry> {
    (any::<u16>(), entry_type(), "[^']{0,20}", any::<u32>())
        .prop_map(|(enum_id, entry_type, title, id)| EnumEntry::new(enum_id, entry_type, title, id))
}

fn separator() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,4}"
}

fn render(entry: &EnumEntry, sep: &str) -> String {
    format!(
        "enumeration{sep} {}{sep}:{sep}type{sep}:{sep}'{}'{sep}title{sep}:{sep}'{}'{sep}id{sep}:{sep}{}{sep};",
        entry.enum_id, entry.entry_type, entry.title, entry.id
    )
}

proptest! {
    #[test]
    fn tokenize_never_panics_and_ends_cleanly(source in "\\PC{0,200}") {
        let tokens = Lexer::new(&source).tokenize_all();

        if let Some((last, rest)) = tokens.split_last() {
            // Only the final token may be terminal
            prop_assert!(rest.iter().all(|t| !t.kind.is_terminal()));
            if last.kind != TokenKind::EndOfFile && last.kind != TokenKind::Error {
                // Input ran out exactly at the end of a token
                prop_assert!(!source.ends_with(char::is_whitespace));
            }
        } else {
            prop_assert!(source.is_empty());
        }
    }

    #[test]
    fn parse_never_panics(source in "[a-z0-9:;' \n]{0,120}") {
        let output = Parser::new(Lexer::new(&source).tokenize_all()).parse_with_diagnostics();
        prop_assert!(output.entries.len() <= source.matches("enumeration").count());
    }

    #[test]
    fn valid_declarations_round_trip(
        entries in prop::collection::vec(entry(), 0..8),
        sep in separator(),
    ) {
        let source = entries
            .iter()
            .map(|entry| render(entry, &sep))
            .collect::<Vec<_>>()
            .join(&format!("{sep}\n"));

        let output = Parser::new(Lexer::new(&source).tokenize_all()).parse_with_diagnostics();

        prop_assert!(output.is_clean());
        prop_assert_eq!(output.entries, entries);
    }

    #[test]
    fn lines_never_decrease(source in "[a-z:;' \n]{0,120}") {
        let tokens = Lexer::new(&source).tokenize_all();
        prop_assert!(tokens.windows(2).all(|pair| pair[0].line <= pair[1].line));
    }
}
