use log::trace;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BinaryOp, CallExpr, CondExpr, FuncExpr, IdentExpr, IndexExpr, ListExpr,
            Literal, LiteralExpr, LoopExpr, Param, TupleExpr, UnaryExpr, UnaryOp,
        },
        statements::{Block, Stmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::parse_block,
    types::{parse_return_chain, parse_type},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => return Err(parser.unexpected("expression")),
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led_fn = match parser.get_led_lookup().get(&token_kind) {
            Some(led_fn) => *led_fn,
            None => return Err(parser.unexpected("operator")),
        };
        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let value = match token.kind {
        TokenKind::Int => match token.value.parse::<i64>() {
            Ok(value) => Literal::Int(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.position,
                ))
            }
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Literal::Float(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.position,
                ))
            }
        },
        TokenKind::Char => match token.value.chars().next() {
            Some(c) => Literal::Char(c),
            None => {
                return Err(Error::internal(
                    "char token without a character",
                    token.position,
                ))
            }
        },
        TokenKind::Str => Literal::Str(token.value),
        TokenKind::True => Literal::Bool(true),
        TokenKind::False => Literal::Bool(false),
        TokenKind::Identifier => {
            parser.advance();
            return Ok(Expr::Ident(IdentExpr {
                name: token.value,
                position: token.position,
            }));
        }
        _ => return Err(parser.unexpected("expression")),
    };

    parser.advance();
    Ok(Expr::Literal(LiteralExpr {
        value,
        position: token.position,
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::Equals => BinaryOp::Equals,
        TokenKind::NotEquals => BinaryOp::NotEquals,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::LessEquals => BinaryOp::LessEquals,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::GreaterEquals => BinaryOp::GreaterEquals,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Ampersand => BinaryOp::BitAnd,
        TokenKind::Caret => BinaryOp::BitXor,
        _ => {
            return Err(Error::internal(
                format!("{} registered as a binary operator", operator_token.kind),
                operator_token.position,
            ))
        }
    };

    // Same binding power on the right keeps operators left-associative
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        position: left.position(),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::Dash => UnaryOp::Minus,
        TokenKind::Not => UnaryOp::Not,
        _ => {
            return Err(Error::internal(
                format!("{} registered as a prefix operator", operator_token.kind),
                operator_token.position,
            ))
        }
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        operator,
        operand: Box::new(operand),
        position: operator_token.position,
    }))
}

/// Parses `(e)` as grouping and `(e1, e2, ...)` as a tuple.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.position;

    let first = parse_expr(parser, BindingPower::Default)?;
    if parser.current_token_kind() != TokenKind::Comma {
        parser.expect(TokenKind::CloseParen)?;
        return Ok(first);
    }

    let mut items = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        items.push(parse_expr(parser, BindingPower::Default)?);
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Tuple(TupleExpr {
        items,
        position: start,
    }))
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.position;
    let items = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(Expr::List(ListExpr {
        items,
        position: start,
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let args_position = parser.expect(TokenKind::OpenParen)?.position;
    let args = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        position: left.position(),
        callee: Box::new(left),
        args,
        args_position,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Index(IndexExpr {
        position: left.position(),
        target: Box::new(left),
        index: Box::new(index),
    }))
}

pub fn parse_block_expr(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Block(parse_block(parser)?))
}

/// Parses `fn (a T, b U) R -> S { ... }`, keeping the parameters and the
/// return chain exactly as written.
pub fn parse_func_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::Fn)?.position;
    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        params.push(parse_param(parser)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            params.push(parse_param(parser)?);
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let return_chain = parse_return_chain(parser)?;
    let body = parse_block(parser)?;
    trace!(
        "parsed function with {} parameters at {}",
        params.len(),
        start
    );

    Ok(Expr::Func(FuncExpr {
        params,
        return_chain,
        body,
        position: start,
    }))
}

fn parse_param(parser: &mut Parser) -> Result<Param, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    let ty = parse_type(parser, BindingPower::Default)?;

    Ok(Param {
        name: name.value,
        ty,
        position: name.position,
    })
}

/// Parses `if test { ... } else { ... }`.
///
/// `else if` is accepted and nests the following conditional in a block.
pub fn parse_cond_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::If)?.position;
    let test = parse_expr(parser, BindingPower::Default)?;
    let then_block = parse_block(parser)?;

    parser.expect(TokenKind::Else)?;
    let else_block = if parser.current_token_kind() == TokenKind::If {
        let nested = parse_cond_expr(parser)?;
        Block {
            position: nested.position(),
            stmts: vec![Stmt::Expr(nested)],
            returns_void: false,
        }
    } else {
        parse_block(parser)?
    };

    Ok(Expr::Cond(CondExpr {
        test: Box::new(test),
        then_block,
        else_block,
        position: start,
    }))
}

pub fn parse_loop_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::For)?.position;
    let binder = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Expr::Loop(LoopExpr {
        binder,
        iterable: Box::new(iterable),
        body,
        position: start,
    }))
}

/// Parses `[expr {, expr}] <close>` after the opening delimiter was consumed.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];

    if parser.current_token_kind() != close {
        items.push(parse_expr(parser, BindingPower::Default)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            items.push(parse_expr(parser, BindingPower::Default)?);
        }
    }
    parser.expect(close)?;

    Ok(items)
}
