//! # Introduction
//!
//! enumconf reads enumeration registry files, which declare the error codes
//! and application ids of a program, and turns them into structured
//! [`parser::ast::EnumEntry`] records.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Entries → Registry
//! ```
//!
//! 1. [`parser::lexer`] — scans the source into tokens. Lexical errors become
//!    `Error` tokens rather than `Err` values.
//! 2. [`parser::parse`] — builds entries, skipping malformed declarations and
//!    recording a [`parser::parse::Diagnostic`] for each one.
//! 3. [`registry`] — optional in-memory id → title lookup built from the
//!    entries.
//!
//! Parsing never fails as a whole: bad input yields fewer entries plus
//! diagnostics.

pub mod parser;
pub mod registry;
