//! Expression lowering
//!
//! Expressions are transcribed directly: literals keep their quotes, booleans
//! become `0` / `1`, operators are parenthesized infix and negation is `!(...)`.
//!
//! A constructor call cannot be written as a C expression, so lowering one
//! produces statements as well as text. They are returned in
//! [`Lowered::pending`] and the statement being emitted writes them first.

use crate::codegen::generator::Generator;
use crate::parser::ast::Expr;

/// C text of an expression plus the statements that must run before it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lowered {
    pub text: String,
    pub pending: Vec<String>,
}

impl Generator {
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Lowered {
        let mut pending = Vec::new();
        let text = self.lower_into(expr, &mut pending);
        Lowered { text, pending }
    }

    pub(crate) fn lower_into(&mut self, expr: &Expr, pending: &mut Vec<String>) -> String {
        match expr {
            Expr::Literal(text) => format!("\"{}\"", text),
            Expr::Number(value) => value.to_string(),
            Expr::Boolean(value) => u8::from(*value).to_string(),
            Expr::Identifier(name) => name.clone(),
            Expr::Not(inner) => format!("!({})", self.lower_into(inner, pending)),
            Expr::Operator { .. } => self.lower_chain(expr, pending),
            Expr::Constructor(ctor) => self.lower_constructor(ctor, pending),
            Expr::Missing => String::new(),
        }
    }

    /// Walk an operator chain down its right spine; the closing parentheses
    /// are all written at the end.
    fn lower_chain(&mut self, mut expr: &Expr, pending: &mut Vec<String>) -> String {
        let mut text = String::new();
        let mut depth = 0;

        while let Expr::Operator { op, left, right } = expr {
            let left = self.lower_into(left, pending);
            text.push('(');
            text.push_str(&left);
            text.push(' ');
            text.push_str(op);
            text.push(' ');
            depth += 1;
            expr = right.as_ref();
        }

        let last = self.lower_into(expr, pending);
        text.push_str(&last);
        text.push_str(&")".repeat(depth));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::*;

    fn lower(expr: &Expr) -> Lowered {
        Generator::new().lower_expr(expr)
    }

    fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    #[test]
    fn test_lower_leaves() {
        assert_eq!(lower(&Expr::Literal("hi there".to_string())).text, "\"hi there\"");
        assert_eq!(lower(&Expr::Number(120)).text, "120");
        assert_eq!(lower(&Expr::Boolean(true)).text, "1");
        assert_eq!(lower(&Expr::Boolean(false)).text, "0");
        assert_eq!(lower(&ident("p.x")).text, "p.x");
        assert_eq!(lower(&Expr::Missing).text, "");
    }

    #[test]
    fn test_lower_operator_chain() {
        let expr = Expr::Operator {
            op: "-".to_string(),
            left: Box::new(ident("a")),
            right: Box::new(Expr::Operator {
                op: "-".to_string(),
                left: Box::new(ident("b")),
                right: Box::new(ident("c")),
            }),
        };
        let lowered = lower(&expr);
        assert_eq!(lowered.text, "(a - (b - c))");
        assert!(lowered.pending.is_empty());
    }

    #[test]
    fn test_lower_grouped_left_operand() {
        let expr = Expr::Operator {
            op: "*".to_string(),
            left: Box::new(Expr::Operator {
                op: "+".to_string(),
                left: Box::new(ident("a")),
                right: Box::new(ident("b")),
            }),
            right: Box::new(Expr::Not(Box::new(ident("c")))),
        };
        assert_eq!(lower(&expr).text, "((a + b) * !(c))");
    }

    #[test]
    fn test_lower_not() {
        assert_eq!(lower(&Expr::Not(Box::new(ident("done")))).text, "!(done)");
    }

    #[test]
    fn test_constructor_in_operand_position() {
        let expr = Expr::Operator {
            op: "+".to_string(),
            left: Box::new(Expr::Number(1)),
            right: Box::new(Expr::Constructor(Constructor {
                type_name: "Box".to_string(),
                arguments: vec![],
            })),
        };
        let lowered = lower(&expr);
        assert_eq!(lowered.text, "(1 + __Instance_1__)");
        assert_eq!(
            lowered.pending,
            vec![
                "Box __Instance_1__;".to_string(),
                "__Construct_Box__(&__Instance_1__);".to_string(),
            ]
        );
    }
}
