// C generator context and translation-unit shell

use crate::parser::ast::{Program, StructDecl};

/// Block id of the `main` body, the implicit outermost block
pub const MAIN_BLOCK: usize = 0;

pub fn start_label(block: usize) -> String {
    format!("__StartBlock_{}__", block)
}

pub fn end_label(block: usize) -> String {
    format!("__EndBlock_{}__", block)
}

pub fn instance_name(instance: usize) -> String {
    format!("__Instance_{}__", instance)
}

/// Name of the procedure that default-initializes a `type_name` instance
pub fn constructor_name(type_name: &str) -> String {
    format!("__Construct_{}__", type_name)
}

/// Emit C source for a parsed program and its hoisted struct declarations.
pub fn generate(program: &Program, declarations: &[StructDecl]) -> String {
    Generator::new().generate(program, declarations)
}

/// Walks the AST once, appending C text
pub struct Generator {
    /// Output buffer
    pub(crate) out: String,

    /// Current indentation depth (tabs)
    pub(crate) indent: usize,

    /// Id of the innermost open block; early exits jump to its end label
    pub(crate) current_block: usize,

    /// Last block id handed out. Ids are never reused.
    pub(crate) last_block: usize,

    /// Last `__Instance_<n>__` number handed out
    pub(crate) last_instance: usize,
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            out: String::new(),
            indent: 0,
            current_block: MAIN_BLOCK,
            last_block: MAIN_BLOCK,
            last_instance: 0,
        }
    }

    pub fn generate(mut self, program: &Program, declarations: &[StructDecl]) -> String {
        self.line("#include <stdio.h>");
        self.blank();

        for declaration in declarations {
            self.emit_struct(declaration);
        }

        self.line("int main(int argc, char *argv[]) {");
        self.indent += 1;
        self.emit_items(&program.items);
        self.line(&format!("{}: ;", end_label(MAIN_BLOCK)));
        self.line("return 0;");
        self.indent -= 1;
        self.line("}");

        log::debug!(
            "generated {} structs, {} blocks, {} instances",
            declarations.len(),
            self.last_block,
            self.last_instance
        );

        self.out
    }

    /// Write one indented line
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write statements buffered by expression lowering, then the statement itself.
    pub(crate) fn emit_with_pending(&mut self, pending: Vec<String>, statement: &str) {
        for text in &pending {
            self.line(text);
        }
        self.line(statement);
    }

    /// Allocate a fresh block id and make it the innermost block.
    /// Returns (new id, enclosing id).
    pub(crate) fn open_block(&mut self) -> (usize, usize) {
        self.last_block += 1;
        let parent = self.current_block;
        self.current_block = self.last_block;
        (self.last_block, parent)
    }

    pub(crate) fn close_block(&mut self, parent: usize) {
        self.current_block = parent;
    }

    pub(crate) fn next_instance(&mut self) -> String {
        self.last_instance += 1;
        instance_name(self.last_instance)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
