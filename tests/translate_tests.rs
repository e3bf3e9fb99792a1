// Integration tests for the bip → C translator

use bipc::parser::ast::{Expr, Item, Statement};
use bipc::{compile, generate, parse, scan, TokenKind};

fn translate(source: &str) -> String {
    let compilation = compile(source).expect("Translation failed");
    assert!(
        compilation.errors.is_empty(),
        "Unexpected syntax errors: {:?}",
        compilation.errors
    );
    compilation.c_source
}

#[test]
fn test_reserved_words_scan_cleanly() {
    let tokens = scan("  print\nrequire  struct\tskip skip_if not true false Int Float Bool String ")
        .expect("Scan failed");

    assert!(tokens
        .iter()
        .all(|t| t.kind != TokenKind::Identifier));
    assert_eq!(tokens.len(), 13);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_identifier_scanned_twice() {
    let tokens = scan("x x").expect("Scan failed");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].kind, tokens[1].kind);
    assert_eq!(tokens[0].value, tokens[1].value);
}

#[test]
fn test_plain_program_has_one_main_and_no_structs() {
    let c = translate(
        r#"
        x = 1
        {
            print "hello"
            y = x + 2
            skip_if y > 2
            print y
        }
        "#,
    );

    assert_eq!(c.matches("int main(").count(), 1);
    assert!(!c.contains("typedef struct"));
    assert!(!c.contains("__Construct_"));
    assert!(c.starts_with("#include <stdio.h>\n"));
    assert!(c.trim_end().ends_with("return 0;\n}"));
}

#[test]
fn test_right_associative_parse() {
    let parsed = parse(scan("print 1 + 2 + 3").unwrap()).unwrap();

    let expr = match &parsed.program.items[0] {
        Item::Statements(statements) => match &statements[0] {
            Statement::Print(expr) => expr.clone(),
            other => panic!("Expected print, got {:?}", other),
        },
        other => panic!("Expected statements, got {:?}", other),
    };

    match &expr {
        Expr::Operator { left, right, .. } => {
            assert_eq!(**left, Expr::Number(1));
            match right.as_ref() {
                Expr::Operator { left, right, .. } => {
                    assert_eq!(**left, Expr::Number(2));
                    assert_eq!(**right, Expr::Number(3));
                }
                other => panic!("Expected nested operator, got {:?}", other),
            }
        }
        other => panic!("Expected operator, got {:?}", other),
    }
}

#[test]
fn test_long_operator_chain_translates() {
    let source = format!("x = 1{}", " + 1".repeat(99_999));
    let c = translate(&source);

    let line = c
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("int x = "))
        .expect("Assignment not emitted");
    assert!(line.starts_with("int x = (1 + (1 + "));
    assert!(line.ends_with(&format!("1{};", ")".repeat(99_999))));
    assert_eq!(line.matches('(').count(), 99_999);
}

#[test]
fn test_sibling_blocks_have_unique_labels() {
    let c = translate("{ { print 1 } { print 2 } } { print 3 }");

    let mut labels: Vec<&str> = c
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("__StartBlock_"))
        .collect();
    let total = labels.len();
    labels.sort();
    labels.dedup();

    assert_eq!(total, 4);
    assert_eq!(labels.len(), total);
}

#[test]
fn test_require_polarity() {
    let c = translate("{ require true }");
    assert!(c.contains("if (!(1)) goto __EndBlock_1__;"));
}

#[test]
fn test_skip_if_polarity() {
    let c = translate("{ skip_if true }");
    assert!(c.contains("if (1) goto __EndBlock_1__;"));
    assert!(!c.contains("!(1)"));
}

#[test]
fn test_struct_default_construction() {
    let c = translate("struct T { n Int }\nt = T()");

    assert!(c.contains("typedef struct T {\n\tint n;\n} T;"));
    assert!(c.contains("void __Construct_T__(T *self) {\n\tself->n = 0;\n}"));
    assert!(c.contains(
        "\tT __Instance_1__;\n\
         \t__Construct_T__(&__Instance_1__);\n\
         \tT t = __Instance_1__;\n"
    ));
}

#[test]
fn test_constructor_arguments_assigned() {
    let c = translate(
        r#"
        struct Point { x Int y Int = 5 }
        {
            p = Point(x 1 y 2)
            print p.x
        }
        "#,
    );

    assert!(c.contains("\t\tPoint __Instance_1__;\n"));
    assert!(c.contains("\t\t__Instance_1__.x = 1;\n"));
    assert!(c.contains("\t\t__Instance_1__.y = 2;\n"));
    assert!(c.contains("\t\tPoint p = __Instance_1__;\n"));
    assert!(c.contains("\t\tprintf(p.x);\n"));
}

#[test]
fn test_declarations_emitted_before_main() {
    let c = translate("{ print 1 struct Late { v Bool } }");

    let decl = c.find("typedef struct Late").expect("Missing struct");
    let main = c.find("int main(").expect("Missing main");
    assert!(decl < main);
    // The hoisted statement leaves nothing behind in the body
    let body = &c[main..];
    assert!(!body.contains("Late"));
}

#[test]
fn test_unterminated_string_aborts() {
    assert!(scan("print \"open").is_err());
    assert!(compile("{ print 1 }\nprint \"open").is_err());
}

#[test]
fn test_exhausted_recovery_aborts() {
    let err = compile("{ print").unwrap_err();
    assert!(err.to_string().contains("Could not continue parsing"));
}

#[test]
fn test_recoverable_errors_still_generate() {
    let compilation = compile("{ print ; print 2 }").expect("Should recover");
    assert_eq!(compilation.errors.len(), 1);
    assert!(compilation.c_source.contains("printf(2);"));
}

#[test]
fn test_generate_is_repeatable() {
    let parsed = parse(scan("{ x = Point() } { skip }").unwrap()).unwrap();
    let first = generate(&parsed.program, &parsed.declarations);
    let second = generate(&parsed.program, &parsed.declarations);
    assert_eq!(first, second);
}
