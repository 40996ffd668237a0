//! Lexical scopes for the type checker.
//!
//! A [`TypeContext`] is a persistent stack of scope frames. Frames are shared
//! through `Rc`; binding into a shared frame copies it first, so a context
//! handed to one branch never sees bindings made through another.

use std::{collections::HashMap, rc::Rc};

use crate::ast::types::Type;

#[derive(Debug, Clone, Default)]
struct Frame {
    bindings: HashMap<String, Type>,
    parent: Option<Rc<Frame>>,
}

#[derive(Debug, Clone)]
pub struct TypeContext {
    frame: Rc<Frame>,
    depth: usize,
}

impl TypeContext {
    /// A context with a single empty scope.
    pub fn new() -> Self {
        TypeContext {
            frame: Rc::new(Frame::default()),
            depth: 1,
        }
    }

    /// A context whose root scope holds the built-in functions.
    pub fn prelude() -> Self {
        TypeContext::from_bindings([
            ("print", Type::func(Type::Str, Type::Void)),
            ("i2s", Type::func(Type::Int, Type::Str)),
            ("f2s", Type::func(Type::Float, Type::Str)),
            ("c2s", Type::func(Type::Char, Type::Str)),
            ("b2s", Type::func(Type::Bool, Type::Str)),
        ])
    }

    /// A context with a single scope holding `bindings`.
    pub fn from_bindings<S, I>(bindings: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Type)>,
    {
        let mut context = TypeContext::new();
        for (name, ty) in bindings {
            context.bind(name, ty);
        }
        context
    }

    /// Returns a context with a new, empty innermost scope.
    pub fn push_scope(&self) -> TypeContext {
        TypeContext {
            frame: Rc::new(Frame {
                bindings: HashMap::new(),
                parent: Some(Rc::clone(&self.frame)),
            }),
            depth: self.depth + 1,
        }
    }

    /// Returns the enclosing context, or `None` at the root scope.
    pub fn pop_scope(&self) -> Option<TypeContext> {
        self.frame.parent.as_ref().map(|parent| TypeContext {
            frame: Rc::clone(parent),
            depth: self.depth - 1,
        })
    }

    /// Binds `name` in the innermost scope, replacing an earlier binding there.
    pub fn bind(&mut self, name: impl Into<String>, ty: Type) {
        Rc::make_mut(&mut self.frame)
            .bindings
            .insert(name.into(), ty);
    }

    /// Resolves `name`, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        let mut frame = Some(&self.frame);
        while let Some(current) = frame {
            if let Some(ty) = current.bindings.get(name) {
                return Some(ty);
            }
            frame = current.parent.as_ref();
        }
        None
    }

    /// Number of scopes, counting the root.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for TypeContext {
    fn default() -> Self {
        TypeContext::new()
    }
}
