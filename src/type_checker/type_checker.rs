use log::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Module},
        expressions::{
            BinaryExpr, BinaryOpClass, CallExpr, CondExpr, FuncExpr, IndexExpr, ListExpr,
            Literal, LoopExpr, UnaryExpr, UnaryOp,
        },
        statements::{Block, Decl, Stmt},
        types::Type,
    },
    desugar::ARGS_NAME,
    errors::errors::{Error, ErrorImpl, SemicolonHint},
    Position,
};

use super::{
    context::TypeContext,
    typed_ast::{TypedBlock, TypedDecl, TypedExpr, TypedExprKind, TypedModule, TypedStmt},
};

/// Checks every declaration of a desugared module, in order, in a fresh
/// scope on top of `context`.
pub fn type_check(module: Module, context: TypeContext) -> Result<TypedModule, Error> {
    let mut scope = context.push_scope();
    let mut decls = vec![];

    for decl in &module.decls {
        let typed = check_decl(decl, &mut scope)?;
        debug!("checked `{}`: {}", typed.ident, typed.ty);
        decls.push(typed);
    }

    Ok(TypedModule { decls })
}

/// Infers the type of `expr` without an expected type.
pub fn type_check_expr(expr: &Expr, context: &TypeContext) -> Result<TypedExpr, Error> {
    infer_expr(expr, None, context)
}

/// Infers the type of `expr` using `expected` as a hint, then requires the
/// two to be equal.
pub fn type_check_expr_against(
    expr: &Expr,
    expected: &Type,
    context: &TypeContext,
) -> Result<TypedExpr, Error> {
    let typed = infer_expr(expr, Some(expected), context)?;
    expect_type(expected, &typed.ty, expr.position())?;
    Ok(typed)
}

pub fn type_check_block(block: &Block, context: &TypeContext) -> Result<TypedBlock, Error> {
    infer_block(block, None, context)
}

/// Fails unless `actual` equals `expected`.
fn expect_type(expected: &Type, actual: &Type, position: Position) -> Result<(), Error> {
    if expected == actual {
        return Ok(());
    }

    let error = match (expected, actual) {
        (Type::Tuple(e), Type::Tuple(a)) if e.len() != a.len() => ErrorImpl::TupleLengthMismatch {
            expected: expected.to_string(),
            found: actual.to_string(),
        },
        _ => ErrorImpl::TypeMismatch {
            expected: expected.to_string(),
            found: actual.to_string(),
        },
    };
    Err(Error::new(error, position))
}

/// Where a mismatch in a block's value is reported.
fn block_value_position(block: &Block) -> Position {
    block
        .trailing_expr()
        .map(Expr::position)
        .unwrap_or(block.position)
}

/// Whether the type of `expr` can only come from an expected type, as with
/// `[]` or a tuple holding one.
fn needs_hint(expr: &Expr) -> bool {
    match expr {
        Expr::List(list) => list.items.iter().all(needs_hint),
        Expr::Tuple(tuple) => tuple.items.iter().any(needs_hint),
        Expr::Block(block) => block_needs_hint(block),
        Expr::Cond(cond) => block_needs_hint(&cond.then_block) && block_needs_hint(&cond.else_block),
        Expr::Loop(lp) => block_needs_hint(&lp.body),
        _ => false,
    }
}

fn block_needs_hint(block: &Block) -> bool {
    block.trailing_expr().is_some_and(needs_hint)
}

/// The declared type of a desugared function literal.
fn signature(func: &FuncExpr) -> Result<Type, Error> {
    match (func.params.as_slice(), func.return_chain.as_slice()) {
        ([param], [ret]) => Ok(Type::func(param.ty.ty.clone(), ret.ty.clone())),
        _ => Err(Error::internal(
            format!(
                "function with {} parameters and {} return types reached the type checker",
                func.params.len(),
                func.return_chain.len()
            ),
            func.position,
        )),
    }
}

/// Whether `decl` unpacks a parameter, `let p: T = $args[i]`. Parameters may
/// have any type, so these skip the void check.
fn is_parameter_binding(decl: &Decl) -> bool {
    match &decl.expr {
        Expr::Index(index) => matches!(index.target.as_ref(), Expr::Ident(ident) if ident.name == ARGS_NAME),
        _ => false,
    }
}

fn check_decl(decl: &Decl, context: &mut TypeContext) -> Result<TypedDecl, Error> {
    // Bound early so the body can refer to itself
    if let Expr::Func(func) = &decl.expr {
        context.bind(decl.ident.clone(), signature(func)?);
    }

    let check_void = |ty: &Type| {
        if ty.contains_void() && !is_parameter_binding(decl) {
            return Err(Error::new(
                ErrorImpl::VoidInDecl {
                    found: ty.to_string(),
                },
                decl.position,
            ));
        }
        Ok(())
    };

    let (expr, ty) = match &decl.declared {
        Some(declared) => {
            check_void(&declared.ty)?;
            let expr = type_check_expr_against(&decl.expr, &declared.ty, context)?;
            (expr, declared.ty.clone())
        }
        None => {
            let expr = infer_expr(&decl.expr, None, context)?;
            check_void(&expr.ty)?;
            let ty = expr.ty.clone();
            (expr, ty)
        }
    };

    context.bind(decl.ident.clone(), ty.clone());
    trace!("bound `{}` at depth {}", decl.ident, context.depth());

    Ok(TypedDecl {
        ident: decl.ident.clone(),
        declared: decl.declared.as_ref().map(|declared| declared.ty.clone()),
        ty,
        expr,
        position: decl.position,
    })
}

fn infer_block(
    block: &Block,
    hint: Option<&Type>,
    context: &TypeContext,
) -> Result<TypedBlock, Error> {
    let mut scope = context.push_scope();
    let mut stmts = vec![];
    let last = block.stmts.len().saturating_sub(1);

    for (i, stmt) in block.stmts.iter().enumerate() {
        let typed = match stmt {
            Stmt::Decl(decl) => TypedStmt::Decl(check_decl(decl, &mut scope)?),
            Stmt::Expr(expr) => {
                let expr_hint = if i == last && !block.returns_void {
                    hint
                } else {
                    None
                };
                TypedStmt::Expr(infer_expr(expr, expr_hint, &scope)?)
            }
        };
        stmts.push(typed);
    }

    let ty = match (block.returns_void, stmts.last()) {
        (false, Some(TypedStmt::Expr(expr))) => expr.ty.clone(),
        _ => Type::Void,
    };

    Ok(TypedBlock {
        stmts,
        returns_void: block.returns_void,
        ty,
        position: block.position,
    })
}

fn infer_expr(expr: &Expr, hint: Option<&Type>, context: &TypeContext) -> Result<TypedExpr, Error> {
    let position = expr.position();

    match expr {
        Expr::Literal(literal) => {
            let ty = match literal.value {
                Literal::Int(_) => Type::Int,
                Literal::Float(_) => Type::Float,
                Literal::Char(_) => Type::Char,
                Literal::Str(_) => Type::Str,
                Literal::Bool(_) => Type::Bool,
            };
            Ok(TypedExpr::new(
                TypedExprKind::Literal(literal.value.clone()),
                ty,
                position,
            ))
        }
        Expr::Ident(ident) => match context.lookup(&ident.name) {
            Some(ty) => Ok(TypedExpr::new(
                TypedExprKind::Ident(ident.name.clone()),
                ty.clone(),
                position,
            )),
            None => Err(Error::new(
                ErrorImpl::UndefinedIdentifier {
                    name: ident.name.clone(),
                },
                position,
            )),
        },
        Expr::Tuple(tuple) => {
            let item_hints: Option<&Vec<Type>> = match hint {
                Some(Type::Tuple(hints)) if hints.len() == tuple.items.len() => Some(hints),
                _ => None,
            };

            let mut items = vec![];
            for (i, item) in tuple.items.iter().enumerate() {
                let item_hint = item_hints.map(|hints| &hints[i]);
                items.push(infer_expr(item, item_hint, context)?);
            }

            let ty = Type::Tuple(items.iter().map(|item| item.ty.clone()).collect());
            Ok(TypedExpr::new(TypedExprKind::Tuple(items), ty, position))
        }
        Expr::List(list) => infer_list(list, hint, context),
        Expr::Func(func) => infer_func(func, context),
        Expr::Call(call) => infer_call(call, context),
        Expr::Block(block) => {
            let typed = infer_block(block, hint, context)?;
            let ty = typed.ty.clone();
            Ok(TypedExpr::new(TypedExprKind::Block(typed), ty, position))
        }
        Expr::Index(index) => infer_index(index, context),
        Expr::Cond(cond) => infer_cond(cond, hint, context),
        Expr::Loop(lp) => infer_loop(lp, hint, context),
        Expr::Unary(unary) => infer_unary(unary, context),
        Expr::Binary(binary) => infer_binary(binary, context),
    }
}

fn infer_list(list: &ListExpr, hint: Option<&Type>, context: &TypeContext) -> Result<TypedExpr, Error> {
    let Some((first, rest)) = list.items.split_first() else {
        return match hint {
            Some(ty @ Type::List(_)) => Ok(TypedExpr::new(
                TypedExprKind::List(vec![]),
                ty.clone(),
                list.position,
            )),
            Some(other) => Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: other.to_string(),
                    found: String::from("[]"),
                },
                list.position,
            )),
            None => Err(Error::new(ErrorImpl::UninferableEmptyList, list.position)),
        };
    };

    let item_hint = match hint {
        Some(Type::List(item)) => Some(item.as_ref()),
        _ => None,
    };

    // Without a hint, the first item that types on its own fixes the item type
    let anchor = match item_hint {
        Some(_) => None,
        None => list.items.iter().position(|item| !needs_hint(item)),
    };
    let (item_ty, mut items) = match anchor {
        Some(anchor) if anchor > 0 => {
            let anchored = infer_expr(&list.items[anchor], None, context)?;
            (anchored.ty, vec![])
        }
        _ => {
            let first = infer_expr(first, item_hint, context)?;
            (first.ty.clone(), vec![first])
        }
    };
    let rest = if items.is_empty() { &list.items[..] } else { rest };

    for item in rest {
        let typed = infer_expr(item, Some(&item_ty), context)?;
        if typed.ty != item_ty {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: item_ty.to_string(),
                    found: typed.ty.to_string(),
                },
                typed.position,
            ));
        }
        items.push(typed);
    }

    Ok(TypedExpr::new(
        TypedExprKind::List(items),
        Type::list(item_ty),
        list.position,
    ))
}

fn infer_func(func: &FuncExpr, context: &TypeContext) -> Result<TypedExpr, Error> {
    let ty = signature(func)?;
    let (param, ret) = match (&func.params[..], &ty) {
        ([param], Type::Func(_, ret)) => (param, ret.as_ref()),
        _ => return Err(Error::internal("malformed function signature", func.position)),
    };

    let mut scope = context.push_scope();
    scope.bind(param.name.clone(), param.ty.ty.clone());

    let body = infer_block(&func.body, Some(ret), &scope)?;
    if &body.ty != ret {
        return Err(Error::new(
            ErrorImpl::ReturnTypeMismatch {
                expected: ret.to_string(),
                found: body.ty.to_string(),
                hint: SemicolonHint(ret.is_void()),
            },
            block_value_position(&func.body),
        ));
    }

    Ok(TypedExpr::new(
        TypedExprKind::Func {
            param: param.name.clone(),
            param_ty: param.ty.ty.clone(),
            return_ty: ret.clone(),
            body,
        },
        ty.clone(),
        func.position,
    ))
}

fn infer_call(call: &CallExpr, context: &TypeContext) -> Result<TypedExpr, Error> {
    let callee = infer_expr(&call.callee, None, context)?;
    let (param, ret) = match &callee.ty {
        Type::Func(param, ret) => (param.as_ref().clone(), ret.as_ref().clone()),
        other => {
            return Err(Error::new(
                ErrorImpl::NonCallable {
                    found: other.to_string(),
                },
                callee.position,
            ))
        }
    };

    let arg = match call.args.as_slice() {
        [arg] => arg,
        args => {
            return Err(Error::internal(
                format!("call with {} arguments reached the type checker", args.len()),
                call.args_position,
            ))
        }
    };

    let arg = infer_expr(arg, Some(&param), context)?;
    if arg.ty != param {
        return Err(Error::new(
            ErrorImpl::ParameterTypeMismatch {
                expected: param.to_string(),
                found: arg.ty.to_string(),
            },
            arg.position,
        ));
    }

    Ok(TypedExpr::new(
        TypedExprKind::Call {
            callee: Box::new(callee),
            arg: Box::new(arg),
        },
        ret,
        call.position,
    ))
}

fn infer_index(index: &IndexExpr, context: &TypeContext) -> Result<TypedExpr, Error> {
    let target = infer_expr(&index.target, None, context)?;

    let (typed_index, ty) = match &target.ty {
        Type::List(_) | Type::Str => {
            let typed_index = infer_expr(&index.index, None, context)?;
            if typed_index.ty != Type::Int {
                return Err(Error::new(
                    ErrorImpl::IndexTypeMismatch {
                        found: typed_index.ty.to_string(),
                    },
                    typed_index.position,
                ));
            }
            let ty = match &target.ty {
                Type::List(item) => item.as_ref().clone(),
                _ => Type::Char,
            };
            (typed_index, ty)
        }
        Type::Tuple(items) => {
            let k = match index.index.as_ref() {
                Expr::Literal(literal) => match literal.value {
                    Literal::Int(k) => k,
                    _ => return Err(Error::new(ErrorImpl::InvalidTupleIndex, literal.position)),
                },
                other => return Err(Error::new(ErrorImpl::InvalidTupleIndex, other.position())),
            };

            let item = usize::try_from(k).ok().and_then(|k| items.get(k));
            let Some(item) = item else {
                return Err(Error::new(
                    ErrorImpl::TupleIndexOutOfRange {
                        size: items.len(),
                        index: k,
                    },
                    index.index.position(),
                ));
            };

            let typed_index = TypedExpr::new(
                TypedExprKind::Literal(Literal::Int(k)),
                Type::Int,
                index.index.position(),
            );
            (typed_index, item.clone())
        }
        other => {
            return Err(Error::new(
                ErrorImpl::NotIndexable {
                    found: other.to_string(),
                },
                target.position,
            ))
        }
    };

    Ok(TypedExpr::new(
        TypedExprKind::Index {
            target: Box::new(target),
            index: Box::new(typed_index),
        },
        ty,
        index.position,
    ))
}

fn infer_cond(cond: &CondExpr, hint: Option<&Type>, context: &TypeContext) -> Result<TypedExpr, Error> {
    let test = infer_expr(&cond.test, Some(&Type::Bool), context)?;
    if test.ty != Type::Bool {
        return Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: Type::Bool.to_string(),
                found: test.ty.to_string(),
            },
            test.position,
        ));
    }

    let (then_block, else_block) =
        if hint.is_none() && block_needs_hint(&cond.then_block) && !block_needs_hint(&cond.else_block) {
            let else_block = infer_block(&cond.else_block, None, context)?;
            let then_block = infer_block(&cond.then_block, Some(&else_block.ty), context)?;
            (then_block, else_block)
        } else {
            let then_block = infer_block(&cond.then_block, hint, context)?;
            let else_block = infer_block(&cond.else_block, Some(&then_block.ty), context)?;
            (then_block, else_block)
        };
    if else_block.ty != then_block.ty {
        return Err(Error::new(
            ErrorImpl::BranchTypeMismatch {
                expected: then_block.ty.to_string(),
                found: else_block.ty.to_string(),
                hint: SemicolonHint(then_block.ty.is_void()),
            },
            block_value_position(&cond.else_block),
        ));
    }

    let ty = then_block.ty.clone();
    Ok(TypedExpr::new(
        TypedExprKind::Cond {
            test: Box::new(test),
            then_block,
            else_block,
        },
        ty,
        cond.position,
    ))
}

fn infer_loop(lp: &LoopExpr, hint: Option<&Type>, context: &TypeContext) -> Result<TypedExpr, Error> {
    let iterable = infer_expr(&lp.iterable, None, context)?;
    let item = match &iterable.ty {
        Type::List(item) => item.as_ref().clone(),
        other => {
            return Err(Error::new(
                ErrorImpl::LoopTargetNotList {
                    found: other.to_string(),
                },
                iterable.position,
            ))
        }
    };

    let mut scope = context.push_scope();
    scope.bind(lp.binder.clone(), item);

    let body_hint = match hint {
        Some(Type::List(item)) => Some(item.as_ref()),
        _ => None,
    };
    let body = infer_block(&lp.body, body_hint, &scope)?;

    let ty = Type::list(body.ty.clone());
    Ok(TypedExpr::new(
        TypedExprKind::Loop {
            binder: lp.binder.clone(),
            iterable: Box::new(iterable),
            body,
        },
        ty,
        lp.position,
    ))
}

fn infer_unary(unary: &UnaryExpr, context: &TypeContext) -> Result<TypedExpr, Error> {
    let operand = infer_expr(&unary.operand, None, context)?;

    let (allowed, ok) = match unary.operator {
        UnaryOp::Plus | UnaryOp::Minus => ("int or float", operand.ty.is_numeric()),
        UnaryOp::Not => ("bool", operand.ty == Type::Bool),
    };
    if !ok {
        return Err(Error::new(
            ErrorImpl::OperandTypeMismatch {
                operator: unary.operator.to_string(),
                expected: String::from(allowed),
                found: operand.ty.to_string(),
            },
            operand.position,
        ));
    }

    let ty = operand.ty.clone();
    Ok(TypedExpr::new(
        TypedExprKind::Unary {
            operator: unary.operator,
            operand: Box::new(operand),
        },
        ty,
        unary.position,
    ))
}

fn infer_binary(binary: &BinaryExpr, context: &TypeContext) -> Result<TypedExpr, Error> {
    let class = binary.operator.class();
    let operator = binary.operator.to_string();

    // An operand like `[]` takes its type from the other side
    let (left, right) = if needs_hint(&binary.left) && !needs_hint(&binary.right) {
        let right = infer_expr(&binary.right, None, context)?;
        (infer_expr(&binary.left, Some(&right.ty), context)?, Some(right))
    } else {
        (infer_expr(&binary.left, None, context)?, None)
    };
    let allowed = match class {
        BinaryOpClass::Equality => None,
        BinaryOpClass::Comparison => Some(("int, float, bool, char or str", left.ty.is_comparable())),
        BinaryOpClass::Arithmetic => Some(("int or float", left.ty.is_numeric())),
        BinaryOpClass::Logical => Some(("bool", left.ty == Type::Bool)),
    };
    if let Some((allowed, false)) = allowed {
        return Err(Error::new(
            ErrorImpl::LeftOperandTypeMismatch {
                operator,
                expected: String::from(allowed),
                found: left.ty.to_string(),
            },
            left.position,
        ));
    }

    // The right operand must match the left one; for logical operators both are bool
    let right = match right {
        Some(right) => right,
        None => infer_expr(&binary.right, Some(&left.ty), context)?,
    };
    if right.ty != left.ty {
        return Err(Error::new(
            ErrorImpl::RightOperandTypeMismatch {
                operator,
                expected: left.ty.to_string(),
                found: right.ty.to_string(),
            },
            right.position,
        ));
    }

    let ty = match class {
        BinaryOpClass::Arithmetic => left.ty.clone(),
        _ => Type::Bool,
    };
    Ok(TypedExpr::new(
        TypedExprKind::Binary {
            left: Box::new(left),
            operator: binary.operator,
            right: Box::new(right),
        },
        ty,
        binary.position,
    ))
}
