//! Rewrites run on the typed module.
//!
//! Parameter prologues (`let p = $args[i]` at the start of a function body)
//! become a single [`TypedStmt::Destructure`], and declared annotations are
//! dropped from every declaration. Running the pass twice changes nothing.

use log::debug;

use crate::{
    ast::{expressions::Literal, types::Type},
    errors::errors::Error,
    type_checker::typed_ast::{
        TypedBlock, TypedDecl, TypedDestructure, TypedExpr, TypedExprKind, TypedModule,
        TypedStmt,
    },
};

use super::ARGS_NAME;

pub fn desugar_after(module: TypedModule) -> Result<TypedModule, Error> {
    let decls = module
        .decls
        .into_iter()
        .map(rewrite_decl)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TypedModule { decls })
}

fn rewrite_decl(decl: TypedDecl) -> Result<TypedDecl, Error> {
    Ok(TypedDecl {
        declared: None,
        expr: rewrite_expr(decl.expr)?,
        ..decl
    })
}

fn rewrite_block(block: TypedBlock) -> Result<TypedBlock, Error> {
    let stmts = block
        .stmts
        .into_iter()
        .map(|stmt| -> Result<TypedStmt, Error> {
            Ok(match stmt {
                TypedStmt::Decl(decl) => TypedStmt::Decl(rewrite_decl(decl)?),
                TypedStmt::Expr(expr) => TypedStmt::Expr(rewrite_expr(expr)?),
                TypedStmt::Destructure(destructure) => TypedStmt::Destructure(TypedDestructure {
                    source: rewrite_expr(destructure.source)?,
                    ..destructure
                }),
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(TypedBlock { stmts, ..block })
}

fn rewrite_exprs(exprs: Vec<TypedExpr>) -> Result<Vec<TypedExpr>, Error> {
    exprs.into_iter().map(rewrite_expr).collect()
}

fn rewrite_boxed(expr: Box<TypedExpr>) -> Result<Box<TypedExpr>, Error> {
    Ok(Box::new(rewrite_expr(*expr)?))
}

fn rewrite_expr(expr: TypedExpr) -> Result<TypedExpr, Error> {
    let TypedExpr { kind, ty, position } = expr;

    let kind = match kind {
        kind @ (TypedExprKind::Literal(_) | TypedExprKind::Ident(_)) => kind,
        TypedExprKind::Tuple(items) => TypedExprKind::Tuple(rewrite_exprs(items)?),
        TypedExprKind::List(items) => TypedExprKind::List(rewrite_exprs(items)?),
        TypedExprKind::Func {
            param,
            param_ty,
            return_ty,
            body,
        } => {
            let mut body = rewrite_block(body)?;
            if param == ARGS_NAME {
                body = materialize_prologue(body)?;
            }
            TypedExprKind::Func {
                param,
                param_ty,
                return_ty,
                body,
            }
        }
        TypedExprKind::Call { callee, arg } => TypedExprKind::Call {
            callee: rewrite_boxed(callee)?,
            arg: rewrite_boxed(arg)?,
        },
        TypedExprKind::Block(block) => TypedExprKind::Block(rewrite_block(block)?),
        TypedExprKind::Index { target, index } => TypedExprKind::Index {
            target: rewrite_boxed(target)?,
            index: rewrite_boxed(index)?,
        },
        TypedExprKind::Cond {
            test,
            then_block,
            else_block,
        } => TypedExprKind::Cond {
            test: rewrite_boxed(test)?,
            then_block: rewrite_block(then_block)?,
            else_block: rewrite_block(else_block)?,
        },
        TypedExprKind::Loop {
            binder,
            iterable,
            body,
        } => TypedExprKind::Loop {
            binder,
            iterable: rewrite_boxed(iterable)?,
            body: rewrite_block(body)?,
        },
        TypedExprKind::Unary { operator, operand } => TypedExprKind::Unary {
            operator,
            operand: rewrite_boxed(operand)?,
        },
        TypedExprKind::Binary {
            left,
            operator,
            right,
        } => TypedExprKind::Binary {
            left: rewrite_boxed(left)?,
            operator,
            right: rewrite_boxed(right)?,
        },
    };

    Ok(TypedExpr { kind, ty, position })
}

/// Whether `stmt` has the shape `let p = $args[k]`.
fn is_prologue_decl(stmt: &TypedStmt) -> bool {
    let TypedStmt::Decl(decl) = stmt else {
        return false;
    };
    let TypedExprKind::Index { target, index } = &decl.expr.kind else {
        return false;
    };

    matches!(&target.kind, TypedExprKind::Ident(name) if name == ARGS_NAME)
        && matches!(index.kind, TypedExprKind::Literal(Literal::Int(_)))
}

fn materialize_prologue(mut body: TypedBlock) -> Result<TypedBlock, Error> {
    let count = body
        .stmts
        .iter()
        .take_while(|stmt| is_prologue_decl(stmt))
        .count();
    if count == 0 {
        return Ok(body);
    }

    let rest = body.stmts.split_off(count);
    let position = body.stmts[0].position();
    let mut source = None;
    let mut bindings = vec![];

    for (expected, stmt) in body.stmts.into_iter().enumerate() {
        let TypedStmt::Decl(decl) = stmt else {
            return Err(Error::internal("prologue statement is not a declaration", position));
        };
        let TypedExprKind::Index { target, index } = decl.expr.kind else {
            return Err(Error::internal("prologue declaration is not an index", decl.position));
        };

        match index.kind {
            TypedExprKind::Literal(Literal::Int(k)) if k == expected as i64 => {}
            _ => {
                return Err(Error::internal(
                    format!("prologue index {} is out of sequence", expected),
                    decl.position,
                ))
            }
        }

        if source.is_none() {
            source = Some(*target);
        }
        bindings.push((decl.ident, decl.ty));
    }

    let Some(source) = source else {
        return Err(Error::internal("empty prologue", position));
    };
    match &source.ty {
        Type::Tuple(items) if items.len() == bindings.len() => {}
        other => {
            return Err(Error::internal(
                format!(
                    "prologue of {} bindings destructures a value of type {}",
                    bindings.len(),
                    other
                ),
                position,
            ))
        }
    }

    debug!("destructured {} parameters at {}", bindings.len(), position);

    let destructure = TypedStmt::Destructure(TypedDestructure {
        source,
        bindings,
        position,
    });
    body.stmts = std::iter::once(destructure).chain(rest).collect();

    Ok(body)
}
