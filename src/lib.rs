//! # Introduction
//!
//! bipc translates programs written in bip, a small imperative teaching
//! language, into C source text.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Tokens → Parser → AST + Declarations → Generator → C
//! ```
//!
//! 1. [`parser::lexer`] tokenises the source through a self-updating
//!    reserved-word table.
//! 2. [`parser::parse`] runs predictive recursive descent with panic-mode
//!    recovery; struct declarations are hoisted into their own list.
//! 3. [`codegen`] lowers blocks to labeled regions, early exits to `goto`,
//!    and struct constructors to stack instances.
//!
//! Each stage runs to completion before the next starts. The three stages are
//! exposed as [`scan`], [`parse`] and [`generate`]; [`compile`] chains them.
//! None of them touch the file system.
//!
//! ## Errors
//!
//! An unterminated string literal, or recovery running out of tokens, is fatal
//! and yields no output. Any other grammar mismatch is collected as a
//! [`SyntaxError`] and parsing carries on. Types, names and number ranges are
//! not checked; such mistakes surface when the C output is compiled.

pub mod codegen;
pub mod parser;

pub use codegen::generator::generate;
pub use parser::ast::{Program, StructDecl};
pub use parser::lexer::{LexError, Token, TokenKind};
pub use parser::parse::{ParseError, Parsed, SyntaxError};

use parser::lexer::Scanner;
use parser::parse::Parser;

/// Tokenize `text` with a fresh scanner. The result ends with an
/// [`TokenKind::Eof`] token.
pub fn scan(text: &str) -> Result<Vec<Token>, LexError> {
    Scanner::new(text).scan_all()
}

/// Parse a token list into the program body and its hoisted declarations.
pub fn parse(tokens: Vec<Token>) -> Result<Parsed, ParseError> {
    Parser::new(tokens).parse()
}

/// Output of a full translation
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Generated C translation unit
    pub c_source: String,
    /// Recoverable errors reported while parsing
    pub errors: Vec<SyntaxError>,
}

/// Scan, parse and generate in one go.
pub fn compile(text: &str) -> Result<Compilation, ParseError> {
    let parsed = parse(scan(text)?)?;
    let c_source = generate(&parsed.program, &parsed.declarations);

    Ok(Compilation {
        c_source,
        errors: parsed.errors,
    })
}
