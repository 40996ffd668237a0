use crate::Position;

use super::{ast::Expr, types::TypeAnnotation};

/// Variable Declaration
/// `let ident [: Type] = expr`, positioned at the `let` keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub ident: String,
    pub declared: Option<TypeAnnotation>,
    pub expr: Expr,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Decl(Decl),
    Expr(Expr),
}

impl Stmt {
    pub fn position(&self) -> Position {
        match self {
            Stmt::Decl(decl) => decl.position,
            Stmt::Expr(expr) => expr.position(),
        }
    }
}

/// Block
///
/// `returns_void` is set when the block is empty or its last statement is
/// followed by `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub returns_void: bool,
    pub position: Position,
}

impl Block {
    /// The expression whose value the block yields, if any.
    pub fn trailing_expr(&self) -> Option<&Expr> {
        if self.returns_void {
            return None;
        }

        match self.stmts.last() {
            Some(Stmt::Expr(expr)) => Some(expr),
            _ => None,
        }
    }
}
