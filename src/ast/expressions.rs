use std::fmt::Display;

use crate::Position;

use super::{ast::Expr, statements::Block, types::TypeAnnotation};

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Bool(bool),
}

/// Literal Expression
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Literal,
    pub position: Position,
}

/// Identifier Expression
/// Represents a reference to a binding in scope. This includes functions.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentExpr {
    pub name: String,
    pub position: Position,
}

// COMPOSITE

/// Tuple Expression
/// Written with at least two items; the desugarer also produces empty tuples.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleExpr {
    pub items: Vec<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    pub items: Vec<Expr>,
    pub position: Position,
}

/// A named, typed function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeAnnotation,
    pub position: Position,
}

/// Function Expression
///
/// As parsed, `params` holds every written parameter and `return_chain` every
/// type of `A -> B -> C`. After desugaring both hold exactly one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncExpr {
    pub params: Vec<Param>,
    pub return_chain: Vec<TypeAnnotation>,
    pub body: Block,
    pub position: Position,
}

/// Call Expression
///
/// `args_position` is the position of the opening parenthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub position: Position,
    pub args_position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub target: Box<Expr>,
    pub index: Box<Expr>,
    pub position: Position,
}

/// Conditional Expression
/// `if test { ... } else { ... }`; both branches are mandatory.
#[derive(Debug, Clone, PartialEq)]
pub struct CondExpr {
    pub test: Box<Expr>,
    pub then_block: Block,
    pub else_block: Block,
    pub position: Position,
}

/// Loop Expression
/// `for binder in iterable { ... }`, evaluating to the list of body results.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopExpr {
    pub binder: String,
    pub iterable: Box<Expr>,
    pub body: Block,
    pub position: Position,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitOr,
    BitAnd,
    BitXor,
}

/// How the checker treats the operands of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOpClass {
    Equality,
    Comparison,
    Arithmetic,
    Logical,
}

impl BinaryOp {
    pub fn class(&self) -> BinaryOpClass {
        match self {
            BinaryOp::Equals | BinaryOp::NotEquals => BinaryOpClass::Equality,
            BinaryOp::Less | BinaryOp::LessEquals | BinaryOp::Greater | BinaryOp::GreaterEquals => {
                BinaryOpClass::Comparison
            }
            BinaryOp::Or | BinaryOp::And => BinaryOpClass::Logical,
            _ => BinaryOpClass::Arithmetic,
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitOr => "|",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<Expr>,
    pub position: Position,
}

/// Binary Expression
/// Positioned at the start of its left operand.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOp,
    pub right: Box<Expr>,
    pub position: Position,
}
