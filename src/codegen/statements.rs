//! Block and statement lowering
//!
//! Every block becomes a labeled compound statement:
//!
//! ```text
//! __StartBlock_<n>__: {
//!     ...
//! }
//! __EndBlock_<n>__: ;
//! ```
//!
//! `skip`, `skip_if` and `require` are forward jumps to the end label of the
//! innermost open block. Struct instances are plain stack values, so a jump can
//! never skip a matching release.

use crate::codegen::generator::{end_label, start_label, Generator};
use crate::parser::ast::{Block, Expr, Item, Statement};

impl Generator {
    pub(crate) fn emit_items(&mut self, items: &[Item]) {
        for item in items {
            match item {
                Item::Block(block) => self.emit_block(block),
                Item::Statements(statements) => {
                    for statement in statements {
                        self.emit_statement(statement);
                    }
                }
            }
        }
    }

    pub(crate) fn emit_block(&mut self, block: &Block) {
        let (id, parent) = self.open_block();

        self.line(&format!("{}: {{", start_label(id)));
        self.indent += 1;
        self.emit_items(&block.items);
        self.indent -= 1;
        self.line("}");
        self.line(&format!("{}: ;", end_label(id)));

        self.close_block(parent);
    }

    pub(crate) fn emit_statement(&mut self, statement: &Statement) {
        let exit = end_label(self.current_block);

        match statement {
            Statement::Print(expr) => {
                let lowered = self.lower_expr(expr);
                self.emit_with_pending(lowered.pending, &format!("printf({});", lowered.text));
            }
            Statement::Assignment { name, value } => {
                // The whole type system: constructed struct or int
                let c_type = match value {
                    Expr::Constructor(ctor) => ctor.type_name.as_str(),
                    _ => "int",
                };
                let lowered = self.lower_expr(value);
                self.emit_with_pending(
                    lowered.pending,
                    &format!("{} {} = {};", c_type, name, lowered.text),
                );
            }
            Statement::Require(guard) => {
                let lowered = self.lower_expr(guard);
                self.emit_with_pending(
                    lowered.pending,
                    &format!("if (!({})) goto {};", lowered.text, exit),
                );
            }
            Statement::SkipIf(guard) => {
                let lowered = self.lower_expr(guard);
                self.emit_with_pending(
                    lowered.pending,
                    &format!("if ({}) goto {};", lowered.text, exit),
                );
            }
            Statement::Skip => self.line(&format!("goto {};", exit)),
            Statement::Empty => {}
        }
    }
}
