/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The module root and the expression sum type
/// - expressions: Definitions for the individual expression nodes and operators
/// - statements: Declarations, statements and blocks
/// - types: Structural types and source type annotations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
