// AST (Abstract Syntax Tree) definitions for the bip translator

/// Parsed executable body: top-level blocks and bare statements in source order.
///
/// Struct declarations are not stored here; the parser hands them out as a
/// separate list (see [`crate::parser::parse::Parsed`]) and leaves a
/// [`Statement::Empty`] at their position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }
}

/// Entry of a program or block body
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Block(Block),
    /// Run of consecutive statements
    Statements(Vec<Statement>),
}

/// Brace-delimited scope, lowered to a labeled region in the output
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub items: Vec<Item>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Print(Expr),
    Assignment { name: String, value: Expr },
    /// Leave the enclosing block when the guard is false
    Require(Expr),
    /// Leave the enclosing block unconditionally
    Skip,
    /// Leave the enclosing block when the guard is true
    SkipIf(Expr),
    /// No-op: a hoisted struct declaration or a statement that failed to parse
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// String literal text, without quotes
    Literal(String),
    Number(u64),
    Boolean(bool),
    /// Plain or dot-compound name (`a.b.c`)
    Identifier(String),
    Not(Box<Expr>),
    /// Binary operator; `right` is always a full expression (flat, right-leaning)
    Operator {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Constructor(Constructor),
    /// Placeholder for an operand that failed to parse
    Missing,
}

impl Expr {
    fn has_children(&self) -> bool {
        matches!(self, Expr::Not(_) | Expr::Operator { .. } | Expr::Constructor(_))
    }

    /// Move every non-leaf child into `out`, leaving `Missing` behind.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        let mut detach = |slot: &mut Expr| {
            if slot.has_children() {
                out.push(std::mem::replace(slot, Expr::Missing));
            }
        };

        match self {
            Expr::Not(inner) => detach(inner.as_mut()),
            Expr::Operator { left, right, .. } => {
                detach(left.as_mut());
                detach(right.as_mut());
            }
            Expr::Constructor(ctor) => {
                for argument in &mut ctor.arguments {
                    detach(&mut argument.value);
                }
            }
            _ => {}
        }
    }
}

// Operator chains nest as deep as they are long; free them with a work list
// instead of the recursive drop glue.
impl Drop for Expr {
    fn drop(&mut self) {
        if !self.has_children() {
            return;
        }

        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

/// `TypeName(field expr field expr ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub type_name: String,
    pub arguments: Vec<StructArgument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructArgument {
    pub field: String,
    pub value: Expr,
}

/// `struct Name { field Type (= expr)? ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<StructField>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: String,
    /// Built-in (`Int`, `Float`, `Bool`, `String`) or another struct's name
    pub type_hint: String,
    pub default: Option<Expr>,
}
