//! bip source code front end
//!
//! This module transforms bip source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST + hoisted struct declarations)
//! - [`ast`]: AST node definitions
//!
//! # The bip Language
//!
//! - Statements: `print`, assignment, `require`, `skip`, `skip_if`, `struct`
//! - Brace-delimited blocks that early-exit statements leave
//! - Expressions without operator precedence, evaluated right to left
//! - No comments, no statement terminator, no escapes in string literals
//!
//! # Parser Implementation
//!
//! Hand-written predictive recursive descent with one token of lookahead and
//! panic-mode error recovery. No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
