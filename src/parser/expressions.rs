//! Expression parsing implementation
//!
//! # Supported Expressions
//!
//! - Literals: strings, numbers, `true` / `false`
//! - Identifiers, including dotted chains (`a.b.c`)
//! - Negation: `not expr` / `! expr`
//! - Constructor calls: `TypeName(field expr field expr ...)`
//! - Grouping: `( expr )`
//! - Binary operators: any operator token
//!
//! # Precedence
//!
//! There is none. An operand followed by an operator becomes the left side of
//! an operator node whose right side is a full expression, so `a - b - c`
//! reads as `a - (b - c)` whatever the operators are.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Context, ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    ///
    /// The operand/operator chain is collected first and folded from the
    /// right afterwards, so chain length does not grow the call stack.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut links = Vec::new();
        let mut last = self.parse_operand()?;

        while self.check(TokenKind::Operator) {
            let op = self.take().lexeme;
            links.push((last, op));
            last = self.parse_operand()?;
        }

        let expr = links
            .into_iter()
            .rev()
            .fold(last, |right, (left, op)| Expr::Operator {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });

        self.synchronize(Context::Expression)?;

        Ok(expr)
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let kind = self.peek().kind;
        let expr = match kind {
            TokenKind::Identifier => self.parse_dotted_name(),
            TokenKind::Literal => Expr::Literal(self.take().lexeme),
            TokenKind::Number => Expr::Number(self.take().value.unwrap_or(0)),
            TokenKind::Boolean => Expr::Boolean(self.take().value == Some(1)),
            TokenKind::Not => {
                self.advance();
                Expr::Not(Box::new(self.parse_expression()?))
            }
            TokenKind::TypeName => self.parse_constructor()?,
            TokenKind::Punct('(') => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::Punct(')'), "expression");
                inner
            }
            _ => {
                self.record("expression", "expression");
                Expr::Missing
            }
        };

        Ok(expr)
    }

    /// `a.b.c` is folded into the single name "a.b.c"
    fn parse_dotted_name(&mut self) -> Expr {
        let mut name = self.take().lexeme;

        while self.check_punct('.') {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_lexeme(TokenKind::Identifier, "identifier"));
        }

        Expr::Identifier(name)
    }

    /// Arguments are `field expr` pairs with nothing between the pairs.
    fn parse_constructor(&mut self) -> Result<Expr, ParseError> {
        let type_name = self.take().lexeme;
        self.expect(TokenKind::Punct('('), "constructor");

        let mut arguments = Vec::new();
        while self.check(TokenKind::Identifier) {
            let field = self.take().lexeme;
            let value = self.parse_expression()?;
            arguments.push(StructArgument { field, value });
        }

        self.expect(TokenKind::Punct(')'), "constructor");

        Ok(Expr::Constructor(Constructor {
            type_name,
            arguments,
        }))
    }
}
