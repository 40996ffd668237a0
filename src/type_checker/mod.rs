//! Type checking and semantic analysis module.
//!
//! This module performs type checking on the desugared AST.
//! It transforms the untyped AST into a typed AST while:
//!
//! - Verifying type correctness of expressions, blocks and declarations
//! - Resolving identifiers through nested lexical scopes
//! - Checking function signatures and argument types
//! - Rejecting `void` inside declared types
//!
//! Scopes live in a persistent [`context::TypeContext`], and an optional
//! expected type flows down to give empty list literals their type.

pub mod context;
pub mod type_checker;
pub mod typed_ast;

#[cfg(test)]
mod tests;
