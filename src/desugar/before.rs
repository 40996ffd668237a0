//! Rewrites run before type checking.
//!
//! Functions end up with exactly one parameter and one return type, and
//! calls with exactly one argument.

use log::debug;

use crate::ast::{
    ast::{Expr, Module},
    expressions::{
        BinaryExpr, CallExpr, CondExpr, FuncExpr, IdentExpr, IndexExpr, ListExpr, Literal,
        LiteralExpr, LoopExpr, Param, TupleExpr, UnaryExpr,
    },
    statements::{Block, Decl, Stmt},
    types::{Type, TypeAnnotation},
};

use super::ARGS_NAME;

pub fn desugar_before(module: Module) -> Module {
    let decls: Vec<Decl> = module.decls.into_iter().map(desugar_decl).collect();
    debug!("desugared {} declarations", decls.len());

    Module { decls }
}

fn desugar_decl(decl: Decl) -> Decl {
    Decl {
        expr: desugar_expr(decl.expr),
        ..decl
    }
}

fn desugar_block(block: Block) -> Block {
    Block {
        stmts: block
            .stmts
            .into_iter()
            .map(|stmt| match stmt {
                Stmt::Decl(decl) => Stmt::Decl(desugar_decl(decl)),
                Stmt::Expr(expr) => Stmt::Expr(desugar_expr(expr)),
            })
            .collect(),
        ..block
    }
}

fn desugar_exprs(exprs: Vec<Expr>) -> Vec<Expr> {
    exprs.into_iter().map(desugar_expr).collect()
}

fn desugar_boxed(expr: Box<Expr>) -> Box<Expr> {
    Box::new(desugar_expr(*expr))
}

pub fn desugar_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Literal(_) | Expr::Ident(_) => expr,
        Expr::Tuple(tuple) => Expr::Tuple(TupleExpr {
            items: desugar_exprs(tuple.items),
            ..tuple
        }),
        Expr::List(list) => Expr::List(ListExpr {
            items: desugar_exprs(list.items),
            ..list
        }),
        Expr::Func(func) => Expr::Func(desugar_func(func)),
        Expr::Call(call) => Expr::Call(desugar_call(call)),
        Expr::Block(block) => Expr::Block(desugar_block(block)),
        Expr::Index(index) => Expr::Index(IndexExpr {
            target: desugar_boxed(index.target),
            index: desugar_boxed(index.index),
            ..index
        }),
        Expr::Cond(cond) => Expr::Cond(CondExpr {
            test: desugar_boxed(cond.test),
            then_block: desugar_block(cond.then_block),
            else_block: desugar_block(cond.else_block),
            ..cond
        }),
        Expr::Loop(lp) => Expr::Loop(LoopExpr {
            iterable: desugar_boxed(lp.iterable),
            body: desugar_block(lp.body),
            ..lp
        }),
        Expr::Unary(unary) => Expr::Unary(UnaryExpr {
            operand: desugar_boxed(unary.operand),
            ..unary
        }),
        Expr::Binary(binary) => Expr::Binary(BinaryExpr {
            left: desugar_boxed(binary.left),
            right: desugar_boxed(binary.right),
            ..binary
        }),
    }
}

fn desugar_func(func: FuncExpr) -> FuncExpr {
    let mut body = desugar_block(func.body);

    let params = match func.params.len() {
        0 => vec![Param {
            name: String::from(ARGS_NAME),
            ty: TypeAnnotation::new(Type::Tuple(vec![]), func.position),
            position: func.position,
        }],
        1 => func.params,
        _ => {
            let position = func.params[0].position;
            let ty = Type::Tuple(func.params.iter().map(|p| p.ty.ty.clone()).collect());

            // let p_i: T_i = $args[i]
            let prologue = func
                .params
                .into_iter()
                .enumerate()
                .map(|(i, param)| {
                    Stmt::Decl(Decl {
                        ident: param.name,
                        expr: Expr::Index(IndexExpr {
                            target: Box::new(Expr::Ident(IdentExpr {
                                name: String::from(ARGS_NAME),
                                position: param.position,
                            })),
                            index: Box::new(Expr::Literal(LiteralExpr {
                                value: Literal::Int(i as i64),
                                position: param.position,
                            })),
                            position: param.position,
                        }),
                        declared: Some(param.ty),
                        position: param.position,
                    })
                });
            body.stmts = prologue.chain(body.stmts).collect();

            vec![Param {
                name: String::from(ARGS_NAME),
                ty: TypeAnnotation::new(ty, position),
                position,
            }]
        }
    };

    let chain: Vec<Type> = func.return_chain.iter().map(|t| t.ty.clone()).collect();
    let first_position = func.return_chain.first().map(|t| t.position);
    let return_chain = match (first_position, Type::curried(&chain)) {
        (Some(position), Some(ty)) => vec![TypeAnnotation::new(ty, position)],
        _ => func.return_chain,
    };

    FuncExpr {
        params,
        return_chain,
        body,
        position: func.position,
    }
}

fn desugar_call(call: CallExpr) -> CallExpr {
    let callee = desugar_boxed(call.callee);
    let mut args = desugar_exprs(call.args);

    if args.len() != 1 {
        args = vec![Expr::Tuple(TupleExpr {
            items: args,
            position: call.args_position,
        })];
    }

    CallExpr {
        callee,
        args,
        ..call
    }
}
