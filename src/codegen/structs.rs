//! Struct declarations and constructor calls
//!
//! Each declaration becomes a typedef'd C struct and a constructor procedure
//! that fills every field of an instance in place. Type hints that are not
//! built in are taken to name another declared struct; that is never checked,
//! a wrong name only shows up when the C output is compiled.

use crate::codegen::generator::{constructor_name, Generator};
use crate::parser::ast::{Constructor, StructDecl};

/// C type for a field type hint
pub fn c_type(type_hint: &str) -> &str {
    match type_hint {
        "Int" | "Bool" => "int",
        "Float" => "float",
        "String" => "char *",
        other => other,
    }
}

/// Zero value of a built-in type hint, `None` for struct types
pub fn zero_value(type_hint: &str) -> Option<&'static str> {
    match type_hint {
        "Int" | "Bool" => Some("0"),
        "Float" => Some("0.0"),
        "String" => Some("\"\""),
        _ => None,
    }
}

/// `int x`, `char *name`
fn declaration(c_type: &str, name: &str) -> String {
    if c_type.ends_with('*') {
        format!("{}{}", c_type, name)
    } else {
        format!("{} {}", c_type, name)
    }
}

impl Generator {
    pub(crate) fn emit_struct(&mut self, decl: &StructDecl) {
        self.line(&format!("typedef struct {} {{", decl.name));
        self.indent += 1;
        for field in &decl.fields {
            self.line(&format!("{};", declaration(c_type(&field.type_hint), &field.name)));
        }
        self.indent -= 1;
        self.line(&format!("}} {};", decl.name));
        self.blank();

        self.line(&format!(
            "void {}({} *self) {{",
            constructor_name(&decl.name),
            decl.name
        ));
        self.indent += 1;
        for field in &decl.fields {
            if let Some(default) = &field.default {
                let lowered = self.lower_expr(default);
                self.emit_with_pending(
                    lowered.pending,
                    &format!("self->{} = {};", field.name, lowered.text),
                );
            } else if let Some(zero) = zero_value(&field.type_hint) {
                self.line(&format!("self->{} = {};", field.name, zero));
            } else {
                self.line(&format!(
                    "{}(&self->{});",
                    constructor_name(&field.type_hint),
                    field.name
                ));
            }
        }
        self.indent -= 1;
        self.line("}");
        self.blank();
    }

    /// Buffer a stack instance, its constructor call and one assignment per
    /// argument; the call itself evaluates to the instance name.
    pub(crate) fn lower_constructor(
        &mut self,
        ctor: &Constructor,
        pending: &mut Vec<String>,
    ) -> String {
        let instance = self.next_instance();

        pending.push(format!("{} {};", ctor.type_name, instance));
        pending.push(format!("{}(&{});", constructor_name(&ctor.type_name), instance));

        for argument in &ctor.arguments {
            let value = self.lower_into(&argument.value, pending);
            pending.push(format!("{}.{} = {};", instance, argument.field, value));
        }

        instance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::*;

    fn field(name: &str, type_hint: &str, default: Option<Expr>) -> StructField {
        StructField {
            name: name.to_string(),
            type_hint: type_hint.to_string(),
            default,
        }
    }

    fn emit(decl: &StructDecl) -> String {
        let mut generator = Generator::new();
        generator.emit_struct(decl);
        generator.out
    }

    #[test]
    fn test_struct_layout() {
        let decl = StructDecl {
            name: "Counter".to_string(),
            fields: vec![field("count", "Int", None)],
            line: 1,
        };
        assert_eq!(
            emit(&decl),
            "typedef struct Counter {\n\
             \tint count;\n\
             } Counter;\n\
             \n\
             void __Construct_Counter__(Counter *self) {\n\
             \tself->count = 0;\n\
             }\n\
             \n"
        );
    }

    #[test]
    fn test_builtin_zero_values() {
        let decl = StructDecl {
            name: "All".to_string(),
            fields: vec![
                field("f", "Float", None),
                field("b", "Bool", None),
                field("s", "String", None),
            ],
            line: 1,
        };
        let c = emit(&decl);
        assert!(c.contains("\tfloat f;\n"));
        assert!(c.contains("\tchar *s;\n"));
        assert!(c.contains("self->f = 0.0;"));
        assert!(c.contains("self->b = 0;"));
        assert!(c.contains("self->s = \"\";"));
    }

    #[test]
    fn test_explicit_default_wins() {
        let decl = StructDecl {
            name: "P".to_string(),
            fields: vec![field("x", "Int", Some(Expr::Number(9)))],
            line: 1,
        };
        assert!(emit(&decl).contains("\tself->x = 9;\n"));
    }

    #[test]
    fn test_struct_typed_field_calls_constructor() {
        let decl = StructDecl {
            name: "Line".to_string(),
            fields: vec![field("from", "Point", None)],
            line: 1,
        };
        let c = emit(&decl);
        assert!(c.contains("\tPoint from;\n"));
        assert!(c.contains("\t__Construct_Point__(&self->from);\n"));
    }

    #[test]
    fn test_constructor_default_in_field() {
        let decl = StructDecl {
            name: "Line".to_string(),
            fields: vec![field(
                "to",
                "Point",
                Some(Expr::Constructor(Constructor {
                    type_name: "Point".to_string(),
                    arguments: vec![StructArgument {
                        field: "x".to_string(),
                        value: Expr::Number(4),
                    }],
                })),
            )],
            line: 1,
        };
        assert!(emit(&decl).contains(
            "\tPoint __Instance_1__;\n\
             \t__Construct_Point__(&__Instance_1__);\n\
             \t__Instance_1__.x = 4;\n\
             \tself->to = __Instance_1__;\n"
        ));
    }

    #[test]
    fn test_nested_constructor_arguments() {
        let mut generator = Generator::new();
        let ctor = Constructor {
            type_name: "Line".to_string(),
            arguments: vec![StructArgument {
                field: "from".to_string(),
                value: Expr::Constructor(Constructor {
                    type_name: "Point".to_string(),
                    arguments: vec![],
                }),
            }],
        };
        let mut pending = Vec::new();
        let text = generator.lower_constructor(&ctor, &mut pending);
        assert_eq!(text, "__Instance_1__");
        assert_eq!(
            pending,
            vec![
                "Line __Instance_1__;",
                "__Construct_Line__(&__Instance_1__);",
                "Point __Instance_2__;",
                "__Construct_Point__(&__Instance_2__);",
                "__Instance_1__.from = __Instance_2__;",
            ]
        );
    }
}
