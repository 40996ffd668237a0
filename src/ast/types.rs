//! Type system definitions for the AST.
//!
//! This module defines the structural types of the language:
//!
//! - Primitive types (`int`, `float`, `char`, `str`, `bool`, `void`)
//! - Composite types (tuples, lists)
//! - Curried single-parameter function types
//!
//! Types carry no source positions, so the derived equality is structural.
//! Annotations written in source are wrapped in [`TypeAnnotation`].

use std::fmt::Display;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Char,
    Str,
    Bool,
    Void,
    Tuple(Vec<Type>),
    List(Box<Type>),
    Func(Box<Type>, Box<Type>),
}

impl Type {
    pub fn list(item: Type) -> Type {
        Type::List(Box::new(item))
    }

    pub fn func(param: Type, ret: Type) -> Type {
        Type::Func(Box::new(param), Box::new(ret))
    }

    /// Builds `T1 -> T2 -> ... -> Tn` from a return-type chain, nesting to the right.
    ///
    /// Returns `None` for an empty chain.
    pub fn curried(chain: &[Type]) -> Option<Type> {
        let (last, rest) = chain.split_last()?;
        Some(
            rest.iter()
                .rev()
                .fold(last.clone(), |ret, param| Type::func(param.clone(), ret)),
        )
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Whether `void` occurs anywhere in this type's tuple/list structure.
    ///
    /// Function types are opaque here: `() -> void` is a legal value type.
    pub fn contains_void(&self) -> bool {
        match self {
            Type::Void => true,
            Type::Tuple(items) => items.iter().any(Type::contains_void),
            Type::List(item) => item.contains_void(),
            _ => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// Whether values of this type can be ordered with `<`, `>`, `<=` and `>=`.
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            Type::Int | Type::Float | Type::Bool | Type::Char | Type::Str
        )
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Char => write!(f, "char"),
            Type::Str => write!(f, "str"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Type::List(item) => write!(f, "[{}]", item),
            Type::Func(param, ret) => match param.as_ref() {
                Type::Func(..) => write!(f, "({}) -> {}", param, ret),
                _ => write!(f, "{} -> {}", param, ret),
            },
        }
    }
}

/// A type as written in source, with the position of its first token.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub ty: Type,
    pub position: Position,
}

impl TypeAnnotation {
    pub fn new(ty: Type, position: Position) -> Self {
        TypeAnnotation { ty, position }
    }
}
