use crate::Position;

use super::{
    expressions::{
        BinaryExpr, CallExpr, CondExpr, FuncExpr, IdentExpr, IndexExpr, ListExpr, LiteralExpr,
        LoopExpr, TupleExpr, UnaryExpr,
    },
    statements::{Block, Decl},
};

/// Root of a parsed source text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub decls: Vec<Decl>,
}

/// Expression
///
/// Defines the various kinds of expressions in the AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Ident(IdentExpr),
    Tuple(TupleExpr),
    List(ListExpr),
    Func(FuncExpr),
    Call(CallExpr),
    Block(Block),
    Index(IndexExpr),
    Cond(CondExpr),
    Loop(LoopExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
}

impl Expr {
    /// Returns the position of the expression's first token.
    pub fn position(&self) -> Position {
        match self {
            Expr::Literal(expr) => expr.position,
            Expr::Ident(expr) => expr.position,
            Expr::Tuple(expr) => expr.position,
            Expr::List(expr) => expr.position,
            Expr::Func(expr) => expr.position,
            Expr::Call(expr) => expr.position,
            Expr::Block(block) => block.position,
            Expr::Index(expr) => expr.position,
            Expr::Cond(expr) => expr.position,
            Expr::Loop(expr) => expr.position,
            Expr::Unary(expr) => expr.position,
            Expr::Binary(expr) => expr.position,
        }
    }
}
