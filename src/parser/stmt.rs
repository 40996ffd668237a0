use crate::{
    ast::statements::{Block, Decl, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token_kind = parser.current_token_kind();
    let stmt_fn = parser.get_stmt_lookup().get(&token_kind).copied();
    if let Some(stmt_fn) = stmt_fn {
        return stmt_fn(parser);
    }

    Ok(Stmt::Expr(parse_expr(parser, BindingPower::Default)?))
}

pub fn parse_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Decl(parse_decl(parser)?))
}

/// Parses `let ident [: Type] = expr`. The terminator is left to the caller.
pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.expect(TokenKind::Let)?.position;
    let ident = parser.expect(TokenKind::Identifier)?.value;

    let declared = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Assignment)?;
    let expr = parse_expr(parser, BindingPower::Default)?;

    Ok(Decl {
        ident,
        declared,
        expr,
        position: start,
    })
}

/// Parses `{ [stmt {; stmt}] [;] }`.
///
/// A statement must be followed by either `;` or the closing brace.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.position;
    let mut stmts = vec![];
    let mut returns_void = true;

    while parser.current_token_kind() != TokenKind::CloseCurly {
        stmts.push(parse_stmt(parser)?);

        if parser.current_token_kind() == TokenKind::Semicolon {
            parser.advance();
            returns_void = true;
        } else if parser.current_token_kind() == TokenKind::CloseCurly {
            returns_void = false;
        } else {
            return Err(parser.unexpected("';' or '}'"));
        }
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block {
        stmts,
        returns_void,
        position: start,
    })
}
