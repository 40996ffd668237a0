use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The stage-group a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Type,
    /// A broken invariant inside the pipeline, never caused by user input alone.
    Internal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn internal(message: impl Into<String>, position: Position) -> Self {
        Error::new(
            ErrorImpl::Internal {
                message: message.into(),
            },
            position,
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedChar
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::InvalidCharLiteral { .. } => ErrorKind::Lex,
            ErrorImpl::UnexpectedToken { .. } | ErrorImpl::NumberParseError { .. } => {
                ErrorKind::Parse
            }
            ErrorImpl::Internal { .. } => ErrorKind::Internal,
            _ => ErrorKind::Type,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match self.get_kind() {
            ErrorKind::Lex => "LexError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Internal => "InternalError",
        }
    }

    /// Whether the error is a user-facing diagnostic rather than an internal fault.
    pub fn is_diagnostic(&self) -> bool {
        self.get_kind() != ErrorKind::Internal
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

/// Renders `, ';' may be missing` when a void result was expected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemicolonHint(pub bool);

impl Display for SemicolonHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 {
            write!(f, ", ';' may be missing")
        } else {
            Ok(())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexer
    #[error("Unexpected character: found {character}")]
    UnrecognisedCharacter { character: char },
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Unterminated char literal")]
    UnterminatedChar,
    #[error("Invalid escape sequence: found \\{sequence}")]
    InvalidEscape { sequence: char },
    #[error("Invalid char literal: expected a single character, found '{literal}'")]
    InvalidCharLiteral { literal: String },

    // Parser
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("Invalid number literal: found {token}")]
    NumberParseError { token: String },

    // Type checker
    #[error("undefined identifier: found {name}")]
    UndefinedIdentifier { name: String },
    #[error("Tuple length mismatch: expected {expected}, found {found}")]
    TupleLengthMismatch { expected: String, found: String },
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
    #[error("Empty list type cannot be inferred: found []")]
    UninferableEmptyList,
    #[error("Function return type mismatch{hint}: expected {expected}, found {found}")]
    ReturnTypeMismatch {
        expected: String,
        found: String,
        hint: SemicolonHint,
    },
    #[error("non-callable target: expected function, found {found}")]
    NonCallable { found: String },
    #[error("Function parameter type mismatch: expected {expected}, found {found}")]
    ParameterTypeMismatch { expected: String, found: String },
    #[error("A decl type cannot contain void: found {found}")]
    VoidInDecl { found: String },
    #[error("Tuple index out of range: expected int < {size}, found {index}")]
    TupleIndexOutOfRange { size: usize, index: i64 },
    #[error("Invalid tuple index: only int literal is allowed for tuple index: found expr")]
    InvalidTupleIndex,
    #[error("Index type mismatch: expected int, found {found}")]
    IndexTypeMismatch { found: String },
    #[error("Indexable type mismatch: expected list, str or tuple, found {found}")]
    NotIndexable { found: String },
    #[error("'else' block should have the same type as 'if' block{hint}: expected {expected}, found {found}")]
    BranchTypeMismatch {
        expected: String,
        found: String,
        hint: SemicolonHint,
    },
    #[error("Loop target should be a list: found {found}")]
    LoopTargetNotList { found: String },
    #[error("Operand type mismatch for '{operator}': expected {expected}, found {found}")]
    OperandTypeMismatch {
        operator: String,
        expected: String,
        found: String,
    },
    #[error("Left-hand operand type mismatch for '{operator}': expected {expected}, found {found}")]
    LeftOperandTypeMismatch {
        operator: String,
        expected: String,
        found: String,
    },
    #[error("Right-hand operand type mismatch for '{operator}': expected {expected}, found {found}")]
    RightOperandTypeMismatch {
        operator: String,
        expected: String,
        found: String,
    },

    // Pipeline invariants
    #[error("internal compiler error: {message}")]
    Internal { message: String },
}
