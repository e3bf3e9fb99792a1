//! C code generator
//!
//! This module turns a parsed program into one C translation unit:
//! - [`generator`]: Generator context, output shell, label and name patterns
//! - [`expressions`]: Expression lowering with pending statements
//! - `statements`: Blocks and statements
//! - [`structs`]: Struct types, constructor procedures and constructor calls
//!
//! # Output Shape
//!
//! One `#include <stdio.h>`, then a typedef + constructor procedure per struct
//! declaration, then `main`. Generation is a pure function of the AST and
//! cannot fail; nothing is type checked.
//!
//! The textual patterns `__StartBlock_<n>__`, `__EndBlock_<n>__`,
//! `__Instance_<n>__` and `__Construct_<T>__` are stable.

pub mod expressions;
pub mod generator;
mod statements;
pub mod structs;
