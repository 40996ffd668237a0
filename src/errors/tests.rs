//! Unit tests for error handling.
//!
//! This module contains tests for error kinds, names and message rendering.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, SemicolonHint};
use crate::Position;

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UndefinedIdentifier {
            name: "foo".to_string(),
        },
        Position::new(3, 7),
    );

    assert_eq!(error.get_position().row, 3);
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_error_names_per_stage() {
    let lex = Error::new(ErrorImpl::UnterminatedString, Position::default());
    let parse = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "expression".to_string(),
            found: ")".to_string(),
        },
        Position::default(),
    );
    let ty = Error::new(ErrorImpl::InvalidTupleIndex, Position::default());
    let internal = Error::internal("broken", Position::default());

    assert_eq!(lex.get_error_name(), "LexError");
    assert_eq!(parse.get_error_name(), "ParseError");
    assert_eq!(ty.get_error_name(), "TypeError");
    assert_eq!(internal.get_error_name(), "InternalError");
    assert_eq!(internal.get_kind(), ErrorKind::Internal);
    assert!(!internal.is_diagnostic());
    assert!(ty.is_diagnostic());
}

#[test]
fn test_undefined_identifier_message() {
    let error = Error::new(
        ErrorImpl::UndefinedIdentifier {
            name: "invalid_ident".to_string(),
        },
        Position::new(1, 9),
    );

    assert_eq!(error.message(), "undefined identifier: found invalid_ident");
    assert_eq!(
        error.to_string(),
        "undefined identifier: found invalid_ident at 1:9"
    );
}

#[test]
fn test_semicolon_hint_is_inserted_before_colon() {
    let with_hint = ErrorImpl::ReturnTypeMismatch {
        expected: "void".to_string(),
        found: "int".to_string(),
        hint: SemicolonHint(true),
    };
    let without_hint = ErrorImpl::ReturnTypeMismatch {
        expected: "bool".to_string(),
        found: "int".to_string(),
        hint: SemicolonHint(false),
    };

    assert_eq!(
        with_hint.to_string(),
        "Function return type mismatch, ';' may be missing: expected void, found int"
    );
    assert_eq!(
        without_hint.to_string(),
        "Function return type mismatch: expected bool, found int"
    );
}

#[test]
fn test_tuple_index_message() {
    let error = ErrorImpl::TupleIndexOutOfRange { size: 3, index: 3 };
    assert_eq!(
        error.to_string(),
        "Tuple index out of range: expected int < 3, found 3"
    );
}

#[test]
fn test_invalid_escape_message() {
    let error = ErrorImpl::InvalidEscape { sequence: 'q' };
    assert_eq!(error.to_string(), "Invalid escape sequence: found \\q");
}
