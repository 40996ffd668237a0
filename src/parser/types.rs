//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Primitive types (`int`, `float`, `char`, `str`, `bool`, `void`)
//! - List types (`[T]`)
//! - Tuple types (`(T1, T2)`), grouping (`(T)`) and the empty tuple (`()`)
//! - Right-associative function types (`T -> U`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing complex type expressions.

use std::collections::HashMap;

use crate::{
    ast::types::{Type, TypeAnnotation},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler =
    fn(&mut Parser, TypeAnnotation, BindingPower) -> Result<TypeAnnotation, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Initializes the type parsing lookup tables.
///
/// Registers NUD and LED handlers for parsing type expressions.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::IntType, parse_primitive_type);
    parser.type_nud(TokenKind::FloatType, parse_primitive_type);
    parser.type_nud(TokenKind::CharType, parse_primitive_type);
    parser.type_nud(TokenKind::StrType, parse_primitive_type);
    parser.type_nud(TokenKind::BoolType, parse_primitive_type);
    parser.type_nud(TokenKind::VoidType, parse_primitive_type);
    parser.type_nud(TokenKind::OpenBracket, parse_list_type);
    parser.type_nud(TokenKind::OpenParen, parse_tuple_type);

    parser.type_led(TokenKind::Arrow, BindingPower::Arrow, parse_func_type);
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let ty = match parser.current_token_kind() {
        TokenKind::IntType => Type::Int,
        TokenKind::FloatType => Type::Float,
        TokenKind::CharType => Type::Char,
        TokenKind::StrType => Type::Str,
        TokenKind::BoolType => Type::Bool,
        TokenKind::VoidType => Type::Void,
        _ => return Err(parser.unexpected("type")),
    };

    Ok(TypeAnnotation::new(ty, parser.advance().position))
}

pub fn parse_list_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.position;
    let item = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation::new(Type::list(item.ty), start))
}

/// `()` is the empty tuple, `(T)` groups and `(T1, T2, ...)` is a tuple.
pub fn parse_tuple_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.position;

    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(TypeAnnotation::new(Type::Tuple(vec![]), start));
    }

    let first = parse_type(parser, BindingPower::Default)?;
    if parser.current_token_kind() != TokenKind::Comma {
        parser.expect(TokenKind::CloseParen)?;
        return Ok(TypeAnnotation::new(first.ty, start));
    }

    let mut items = vec![first.ty];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        items.push(parse_type(parser, BindingPower::Default)?.ty);
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(TypeAnnotation::new(Type::Tuple(items), start))
}

pub fn parse_func_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::Arrow)?;

    // Parsing the right side from the lowest power nests to the right
    let right = parse_type(parser, BindingPower::Default)?;

    Ok(TypeAnnotation::new(
        Type::func(left.ty, right.ty),
        left.position,
    ))
}

/// Parses the `R1 -> R2 -> ...` return types of a function literal as a flat list.
pub fn parse_return_chain(parser: &mut Parser) -> Result<Vec<TypeAnnotation>, Error> {
    let mut chain = vec![parse_type(parser, BindingPower::Arrow)?];

    while parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        chain.push(parse_type(parser, BindingPower::Arrow)?);
    }

    Ok(chain)
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeAnnotation, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => return Err(parser.unexpected("type")),
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led_fn = match parser.get_type_led_lookup().get(&token_kind) {
            Some(led_fn) => *led_fn,
            None => return Err(parser.unexpected("type")),
        };
        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}
