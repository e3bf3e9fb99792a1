//! Statement parsing implementation
//!
//! This module handles the program skeleton and every statement form:
//!
//! - Blocks: `{ ... }`, nested freely
//! - Output: `print expr`
//! - Assignment: `name = expr`
//! - Block exits: `require expr`, `skip`, `skip_if expr`
//! - Struct declarations (delegated to `declarations`)
//!
//! # Grammar
//!
//! ```text
//! program    ::= ( block | statements )* EOF
//! block      ::= "{" ( block | statements )* "}"
//! statements ::= statement*
//! statement  ::= print | assign | require | skip | skip_if | struct_decl
//! ```
//!
//! There is no statement terminator.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Context, ParseError, Parser};

impl Parser {
    /// Parse the top-level body (does not check for end of input)
    pub(crate) fn parse_program(&mut self) -> Result<Program, ParseError> {
        let items = self.parse_items()?;
        Ok(Program { items })
    }

    /// Blocks and statement runs, until something that starts neither
    fn parse_items(&mut self) -> Result<Vec<Item>, ParseError> {
        let mut items = Vec::new();

        loop {
            if self.check_punct('{') {
                items.push(Item::Block(self.parse_block()?));
            } else if self.starts_statement() {
                items.push(Item::Statements(self.parse_statements()?));
            } else {
                break;
            }
        }

        Ok(items)
    }

    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let line = self.peek().line;

        self.expect(TokenKind::Punct('{'), "block");
        let items = self.parse_items()?;
        self.expect(TokenKind::Punct('}'), "block");

        self.synchronize(Context::Block)?;

        Ok(Block { items, line })
    }

    pub(crate) fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();

        while self.starts_statement() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let kind = self.peek().kind;
        let statement = match kind {
            TokenKind::Print => {
                self.advance();
                Statement::Print(self.parse_expression()?)
            }
            TokenKind::Identifier => self.parse_assignment()?,
            TokenKind::Require => {
                self.advance();
                Statement::Require(self.parse_expression()?)
            }
            TokenKind::Skip => {
                self.advance();
                Statement::Skip
            }
            TokenKind::SkipIf => {
                self.advance();
                Statement::SkipIf(self.parse_expression()?)
            }
            TokenKind::Struct => {
                // Hoisted: the declaration goes to its own list, a no-op stays here
                let declaration = self.parse_struct_declaration()?;
                self.declarations.push(declaration);
                Statement::Empty
            }
            _ => {
                self.record("statement", "statement");
                Statement::Empty
            }
        };

        self.synchronize(Context::Statement)?;

        Ok(statement)
    }

    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let name = self.expect_lexeme(TokenKind::Identifier, "assignment");
        self.expect(TokenKind::Punct('='), "assignment");
        let value = self.parse_expression()?;

        Ok(Statement::Assignment { name, value })
    }
}
