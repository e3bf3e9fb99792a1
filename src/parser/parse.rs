//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! error types, token helpers, panic-mode recovery and the parse entry point.
//!
//! # Parser Architecture
//!
//! A single-token-lookahead predictive parser. The kind of the current token
//! alone selects the production; nothing is ever re-parsed.
//! - This module: Parser struct, helper methods, recovery
//! - `statements`: program, blocks and statements
//! - `expressions`: expressions, operands and constructor calls
//! - `declarations`: struct declarations
//!
//! # Error Recovery
//!
//! A failed match is recorded as a [`SyntaxError`] without consuming anything,
//! and the current production carries on. At the end of every expression,
//! statement and block the parser checks for a pending error and, if there is
//! one, skips tokens until a synchronization point for that context. Running
//! out of tokens while synchronizing is fatal ([`ParseError`]).

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Scanner, Token, TokenKind};
use std::fmt;

/// Recoverable grammar mismatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Production that failed
    pub rule: &'static str,
    pub line: usize,
    pub expected: String,
    pub found: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: syntax error at line {}, expected '{}', found '{}'",
            self.rule, self.line, self.expected, self.found
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Fatal parser error. No output may be produced after one of these.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            line: err.line,
        }
    }
}

/// Result of a parse that did not hit a fatal error
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    /// Executable body
    pub program: Program,
    /// Struct declarations in source order, hoisted out of the body
    pub declarations: Vec<StructDecl>,
    /// Recoverable errors, in the order they were found
    pub errors: Vec<SyntaxError>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Grammar level a synchronization runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    Expression,
    Statement,
    Block,
}

/// Recursive descent parser for bip
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Line of the last consumed token, used in error reports
    pub(crate) line: usize,
    pub(crate) has_error: bool,
    pub(crate) errors: Vec<SyntaxError>,
    pub(crate) declarations: Vec<StructDecl>,
}

impl Parser {
    /// Create a parser over an already scanned token list.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }

        Self {
            tokens,
            position: 0,
            line: 1,
            has_error: false,
            errors: Vec::new(),
            declarations: Vec::new(),
        }
    }

    /// Scan `source` with a fresh scanner and create a parser over the result.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let tokens = Scanner::new(source).scan_all()?;
        Ok(Self::new(tokens))
    }

    /// Parse the whole token list.
    ///
    /// Succeeds with recoverable errors collected in [`Parsed::errors`]; the
    /// program must be followed by end of input, anything else is one more
    /// recorded error.
    pub fn parse(mut self) -> Result<Parsed, ParseError> {
        let program = self.parse_program()?;

        if !self.check(TokenKind::Eof) {
            self.record("parse", "end of input");
        }

        log::debug!(
            "parsed {} top-level items, {} struct declarations, {} syntax errors",
            program.items.len(),
            self.declarations.len(),
            self.errors.len()
        );

        Ok(Parsed {
            program,
            declarations: self.declarations,
            errors: self.errors,
        })
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    pub(crate) fn check_punct(&self, c: char) -> bool {
        self.peek().is_punct(c)
    }

    /// Move past the current token. Returns false when already at end of input.
    pub(crate) fn advance(&mut self) -> bool {
        self.line = self.peek().line;

        if self.position + 1 < self.tokens.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Return the current token and move past it.
    pub(crate) fn take(&mut self) -> Token {
        let token = self.peek().clone();
        self.advance();
        token
    }

    /// Consume a token of `kind`, or record an error for `rule` and consume nothing.
    pub(crate) fn expect(&mut self, kind: TokenKind, rule: &'static str) -> Option<Token> {
        if self.check(kind) {
            Some(self.take())
        } else {
            self.record(rule, &kind.to_string());
            None
        }
    }

    /// Like [`Parser::expect`], yielding the lexeme (empty on failure).
    pub(crate) fn expect_lexeme(&mut self, kind: TokenKind, rule: &'static str) -> String {
        self.expect(kind, rule).map(|t| t.lexeme).unwrap_or_default()
    }

    pub(crate) fn record(&mut self, rule: &'static str, expected: &str) {
        let error = SyntaxError {
            rule,
            line: self.line,
            expected: expected.to_string(),
            found: self.peek().to_string(),
        };
        log::debug!("{}", error);
        self.errors.push(error);
        self.has_error = true;
    }

    /// Tokens that can open a statement
    pub(crate) fn starts_statement(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Print
                | TokenKind::Identifier
                | TokenKind::Require
                | TokenKind::Skip
                | TokenKind::SkipIf
                | TokenKind::Struct
        )
    }

    /// Panic-mode recovery for a pending error, keyed by grammar level.
    ///
    /// Expression and statement levels stop in front of a statement start
    /// (statements also in front of `{`) and stop after a `;`. The block level
    /// stops in front of `{` and after `}`.
    pub(crate) fn synchronize(&mut self, context: Context) -> Result<(), ParseError> {
        if !self.has_error {
            return Ok(());
        }
        self.has_error = false;

        loop {
            match context {
                Context::Expression | Context::Statement => {
                    if self.starts_statement()
                        || (context == Context::Statement && self.check_punct('{'))
                    {
                        break;
                    }
                    if self.check_punct(';') {
                        self.advance();
                        break;
                    }
                }
                Context::Block => {
                    if self.check_punct('{') {
                        break;
                    }
                    if self.check_punct('}') {
                        self.advance();
                        break;
                    }
                }
            }

            if !self.advance() {
                return Err(ParseError {
                    message: "Could not continue parsing".to_string(),
                    line: self.line,
                });
            }
        }

        log::trace!(
            "recovered at line {} ({:?} context), resuming at '{}'",
            self.line,
            context,
            self.peek()
        );
        Ok(())
    }
}
