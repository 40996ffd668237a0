//! Typed Abstract Syntax Tree definitions.
//!
//! This module contains the typed variants of AST nodes produced by
//! the type checker. Each typed node includes type information and
//! has been validated for type correctness.
//!
//! The typed AST mirrors the structure of the desugared AST but includes:
//! - One resolved type on every expression
//! - Single-parameter function signatures
//! - Single-argument calls
//! - The value type of every block
//!
//! After the post-check desugarer runs, parameter prologues appear as
//! [`TypedStmt::Destructure`] and declared annotations are gone.

use crate::{
    ast::{
        expressions::{BinaryOp, Literal, UnaryOp},
        types::Type,
    },
    Position,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypedModule {
    pub decls: Vec<TypedDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedDecl {
    pub ident: String,
    /// The annotation as written, erased by the post-check desugarer.
    pub declared: Option<Type>,
    /// The bound type.
    pub ty: Type,
    pub expr: TypedExpr,
    pub position: Position,
}

/// Binds every component of a tuple-typed value to a name.
///
/// `bindings[i]` receives component `i` of `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDestructure {
    pub source: TypedExpr,
    pub bindings: Vec<(String, Type)>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedStmt {
    Decl(TypedDecl),
    Expr(TypedExpr),
    Destructure(TypedDestructure),
}

impl TypedStmt {
    pub fn position(&self) -> Position {
        match self {
            TypedStmt::Decl(decl) => decl.position,
            TypedStmt::Expr(expr) => expr.position,
            TypedStmt::Destructure(destructure) => destructure.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedBlock {
    pub stmts: Vec<TypedStmt>,
    pub returns_void: bool,
    /// The value type of the block.
    pub ty: Type,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub ty: Type,
    pub position: Position,
}

impl TypedExpr {
    pub fn new(kind: TypedExprKind, ty: Type, position: Position) -> Self {
        TypedExpr { kind, ty, position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedExprKind {
    Literal(Literal),
    Ident(String),
    Tuple(Vec<TypedExpr>),
    List(Vec<TypedExpr>),
    Func {
        param: String,
        param_ty: Type,
        return_ty: Type,
        body: TypedBlock,
    },
    Call {
        callee: Box<TypedExpr>,
        arg: Box<TypedExpr>,
    },
    Block(TypedBlock),
    Index {
        target: Box<TypedExpr>,
        index: Box<TypedExpr>,
    },
    Cond {
        test: Box<TypedExpr>,
        then_block: TypedBlock,
        else_block: TypedBlock,
    },
    Loop {
        binder: String,
        iterable: Box<TypedExpr>,
        body: TypedBlock,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<TypedExpr>,
    },
    Binary {
        left: Box<TypedExpr>,
        operator: BinaryOp,
        right: Box<TypedExpr>,
    },
}
