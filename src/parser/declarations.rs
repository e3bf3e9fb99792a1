//! Declaration parsing implementation
//!
//! Struct declarations may appear wherever a statement can. The caller
//! (`parse_statement`) moves the result onto the parser's declaration list.
//!
//! # Grammar
//!
//! ```text
//! struct_decl ::= "struct" TypeName "{" field* "}"
//! field       ::= identifier TypeName ( "=" expr )?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse struct declaration: struct Name { fields }
    pub(crate) fn parse_struct_declaration(&mut self) -> Result<StructDecl, ParseError> {
        let line = self.peek().line;

        self.expect(TokenKind::Struct, "struct");
        let name = self.expect_lexeme(TokenKind::TypeName, "struct");
        self.expect(TokenKind::Punct('{'), "struct");

        let mut fields = Vec::new();
        while self.check(TokenKind::Identifier) {
            let field_name = self.take().lexeme;
            let type_hint = self.expect_lexeme(TokenKind::TypeName, "field");

            let default = if self.check_punct('=') {
                self.advance();
                Some(self.parse_expression()?)
            } else {
                None
            };

            fields.push(StructField {
                name: field_name,
                type_hint,
                default,
            });
        }

        self.expect(TokenKind::Punct('}'), "struct");

        Ok(StructDecl { name, fields, line })
    }
}
