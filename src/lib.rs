#![allow(clippy::module_inception)]

use std::fmt::Display;

use log::debug;

use crate::{
    desugar::{after::desugar_after, before::desugar_before},
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{context::TypeContext, type_checker::type_check, typed_ast::TypedModule},
};

pub mod ast;
pub mod desugar;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

/// A 1-based source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { row: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Runs the whole front end with an empty initial scope.
pub fn compile(source: &str) -> Result<TypedModule, Error> {
    compile_with_context(source, TypeContext::new())
}

/// Runs the whole front end, resolving free identifiers against `context`.
///
/// Stops at the first diagnostic; nothing is printed.
pub fn compile_with_context(source: &str, context: TypeContext) -> Result<TypedModule, Error> {
    let tokens = tokenize(source)?;
    debug!("tokenized {} tokens", tokens.len());

    let module = parse(tokens)?;
    debug!("parsed {} declarations", module.decls.len());

    let module = desugar_before(module);
    let typed = type_check(module, context)?;

    desugar_after(typed)
}
