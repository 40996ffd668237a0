//! Unit tests for the type checker.
//!
//! Expressions are written as `let x = <expr>`, parsed and desugared, then
//! checked on their own against a hand-built context.

use crate::{
    ast::{ast::Expr, statements::Block, types::Type},
    desugar::before::desugar_before,
    errors::errors::{Error, ErrorKind},
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

use super::{
    context::TypeContext,
    type_checker::{type_check, type_check_block, type_check_expr, type_check_expr_against},
    typed_ast::{TypedExprKind, TypedModule},
};

fn func(param: Type, ret: Type) -> Type {
    Type::func(param, ret)
}

fn tuple(items: Vec<Type>) -> Type {
    Type::Tuple(items)
}

/// Builds a context with one scope per slice, outermost first.
fn scopes(frames: &[&[(&str, Type)]]) -> TypeContext {
    let mut context = TypeContext::new();
    for frame in frames {
        context = context.push_scope();
        for (name, ty) in frame.iter() {
            context.bind(*name, ty.clone());
        }
    }
    context
}

fn ctx(bindings: &[(&str, Type)]) -> TypeContext {
    scopes(&[bindings])
}

fn desugared_expr(source: &str) -> Expr {
    let tokens = tokenize(&format!("let x = {}", source)).unwrap();
    let module = desugar_before(parse(tokens).unwrap());
    module.decls.into_iter().next().unwrap().expr
}

fn check_against(source: &str, context: &TypeContext, expected: &Type) -> Result<Type, Error> {
    type_check_expr_against(&desugared_expr(source), expected, context).map(|typed| typed.ty)
}

fn assert_type(source: &str, context: TypeContext, expected: Type) {
    assert_eq!(check_against(source, &context, &expected).unwrap(), expected);
}

fn assert_error(source: &str, context: TypeContext, expected: Type, message: &str) {
    let error = check_against(source, &context, &expected).unwrap_err();
    assert_eq!(error.get_kind(), ErrorKind::Type);
    assert_eq!(error.message(), message);
}

/// Checks the body of `let x = fn () <ty> <block>` in `context`.
fn block_type(block: &str, ret: &str, context: TypeContext) -> Type {
    let Expr::Func(func) = desugared_expr(&format!("fn () {} {}", ret, block)) else {
        panic!("expected function");
    };
    let body: Block = func.body;
    type_check_block(&body, &context).unwrap().ty
}

fn check_program(source: &str, context: TypeContext) -> Result<TypedModule, Error> {
    let module = desugar_before(parse(tokenize(source).unwrap()).unwrap());
    type_check(module, context)
}

#[test]
fn test_literals() {
    assert_type("123", ctx(&[]), Type::Int);
    assert_type(".123", ctx(&[]), Type::Float);
    assert_type("\"hello, world\"", ctx(&[]), Type::Str);
    assert_type("true", ctx(&[]), Type::Bool);
    assert_type("false", ctx(&[]), Type::Bool);
    assert_type("'\\n'", ctx(&[]), Type::Char);
}

#[test]
fn test_identifiers_resolve_innermost_first() {
    assert_type("some_ident", ctx(&[("some_ident", Type::Int)]), Type::Int);
    assert_type(
        "some_ident",
        scopes(&[&[], &[("other_ident", Type::Float)], &[("some_ident", Type::Int)], &[]]),
        Type::Int,
    );
    assert_type(
        "some_ident",
        scopes(&[&[("some_ident", Type::Int)], &[("some_ident", Type::Str)]]),
        Type::Str,
    );
    assert_error(
        "invalid_ident",
        scopes(&[&[], &[("one_ident", Type::Int)], &[("some_ident", Type::Str)], &[]]),
        Type::Str,
        "undefined identifier: found invalid_ident",
    );
}

#[test]
fn test_tuples() {
    assert_type(
        "(1, \"hello\", true)",
        ctx(&[]),
        tuple(vec![Type::Int, Type::Str, Type::Bool]),
    );
    assert_error(
        "(1, \"hello\", true)",
        ctx(&[]),
        tuple(vec![Type::Int, Type::Str, Type::Bool, Type::Char]),
        "Tuple length mismatch: expected (int, str, bool, char), found (int, str, bool)",
    );
    assert_error(
        "(1, \"hello\", true)",
        ctx(&[]),
        tuple(vec![Type::Int, Type::Char, Type::Bool]),
        "Type mismatch: expected (int, char, bool), found (int, str, bool)",
    );
}

#[test]
fn test_lists() {
    assert_type("[1, 2, 3, 4]", ctx(&[]), Type::list(Type::Int));
    assert_type("[]", ctx(&[]), Type::list(Type::Int));
    assert_type("[]", ctx(&[]), Type::list(Type::Str));
    assert_type(
        "[[1], [2, 3, 4], []]",
        ctx(&[]),
        Type::list(Type::list(Type::Int)),
    );
    assert_type(
        "[some_ident, 4]",
        ctx(&[("some_ident", Type::Int)]),
        Type::list(Type::Int),
    );
    assert_error(
        "[some_ident, 4]",
        ctx(&[("some_ident", Type::Int)]),
        Type::list(Type::Str),
        "Type mismatch: expected [str], found [int]",
    );
    assert_error(
        "[some_ident, \"str\", 4]",
        ctx(&[("some_ident", Type::Int)]),
        Type::list(Type::Int),
        "Type mismatch: expected int, found str",
    );
}

#[test]
fn test_empty_list_needs_a_list_hint() {
    let error = type_check_expr(&desugared_expr("[]"), &ctx(&[])).unwrap_err();
    assert_eq!(error.message(), "Empty list type cannot be inferred: found []");

    assert_error("[]", ctx(&[]), Type::Int, "Type mismatch: expected int, found []");
}

#[test]
fn test_list_item_mismatch_is_positioned_at_item() {
    let error = type_check_expr(&desugared_expr("[1, 2, 'c']"), &ctx(&[])).unwrap_err();
    assert_eq!(*error.get_position(), Position::new(1, 16));
}

#[test]
fn test_function_literals() {
    assert_type("fn (a int) bool { true }", ctx(&[]), func(Type::Int, Type::Bool));
    assert_type(
        "fn (a int, b str) bool { true }",
        ctx(&[]),
        func(tuple(vec![Type::Int, Type::Str]), Type::Bool),
    );
    assert_type(
        "fn (a int, b str) bool -> char { fn (c bool) char { 'a' } }",
        ctx(&[]),
        func(
            tuple(vec![Type::Int, Type::Str]),
            func(Type::Bool, Type::Char),
        ),
    );
    assert_type(
        "fn (a str -> int) bool -> char { fn (c bool) char { 'a' } }",
        ctx(&[]),
        func(func(Type::Str, Type::Int), func(Type::Bool, Type::Char)),
    );
    assert_type(
        "fn (a float, b str -> int) bool -> char { fn (c bool) char { 'a' } }",
        ctx(&[]),
        func(
            tuple(vec![Type::Float, func(Type::Str, Type::Int)]),
            func(Type::Bool, Type::Char),
        ),
    );
    assert_type("fn () void {}", ctx(&[]), func(tuple(vec![]), Type::Void));
}

#[test]
fn test_function_signature_mismatches() {
    assert_error(
        "fn (a int, b str) bool { false }",
        ctx(&[]),
        func(tuple(vec![Type::Char, Type::Str]), Type::Bool),
        "Type mismatch: expected (char, str) -> bool, found (int, str) -> bool",
    );
    assert_error(
        "fn (a int, b str) bool -> char { fn (c bool) char { 'a' } }",
        ctx(&[]),
        func(
            tuple(vec![Type::Int, Type::Str]),
            func(Type::Bool, Type::Bool),
        ),
        "Type mismatch: expected (int, str) -> bool -> bool, found (int, str) -> bool -> char",
    );
    assert_error(
        "fn (a str -> int) bool -> char { fn (c bool) char { 'a' } }",
        ctx(&[]),
        func(func(Type::Str, Type::Bool), func(Type::Bool, Type::Char)),
        "Type mismatch: expected (str -> bool) -> bool -> char, found (str -> int) -> bool -> char",
    );
}

#[test]
fn test_function_return_mismatches() {
    assert_error(
        "fn (a int) bool {}",
        ctx(&[]),
        func(Type::Int, Type::Bool),
        "Function return type mismatch: expected bool, found void",
    );
    assert_error(
        "fn (a int) bool { a }",
        ctx(&[]),
        func(Type::Int, Type::Bool),
        "Function return type mismatch: expected bool, found int",
    );
    assert_error(
        "fn (a int) void { a }",
        ctx(&[]),
        func(Type::Int, Type::Void),
        "Function return type mismatch, ';' may be missing: expected void, found int",
    );
    assert_type("fn (a int) void { a; }", ctx(&[]), func(Type::Int, Type::Void));
}

#[test]
fn test_return_mismatch_positions() {
    let error = type_check_expr(&desugared_expr("fn (a int) bool {\n  a\n}"), &ctx(&[]))
        .unwrap_err();
    assert_eq!(*error.get_position(), Position::new(2, 3));

    let error = type_check_expr(&desugared_expr("fn (a int) bool {}"), &ctx(&[])).unwrap_err();
    assert_eq!(*error.get_position(), Position::new(1, 25));
}

#[test]
fn test_calls() {
    assert_type("fn (a int, b int) int { a } (1, 2)", ctx(&[]), Type::Int);
    assert_type("fn (a str) char { 'a' } (\"hello\")", ctx(&[]), Type::Char);
    assert_type(
        "fn (a str -> int) bool -> char { fn (c bool) char { 'a' } } (fn (a str) int { 1 })",
        ctx(&[]),
        func(Type::Bool, Type::Char),
    );
    assert_type(
        "f1(f2)",
        ctx(&[
            (
                "f1",
                func(func(Type::Str, Type::Bool), func(Type::Bool, Type::Char)),
            ),
            ("f2", func(Type::Str, Type::Bool)),
        ]),
        func(Type::Bool, Type::Char),
    );
    assert_type("f()", ctx(&[("f", func(tuple(vec![]), Type::Int))]), Type::Int);
}

#[test]
fn test_call_errors() {
    assert_error(
        "\"i am not callable\"(1, 'c')",
        ctx(&[]),
        Type::Void,
        "non-callable target: expected function, found str",
    );
    assert_error(
        "fn (a int, b int) int { a } (1, 'c')",
        ctx(&[]),
        Type::Int,
        "Function parameter type mismatch: expected (int, int), found (int, char)",
    );
    assert_error(
        "fn (a str) char { 'a' } (.123)",
        ctx(&[]),
        Type::Char,
        "Function parameter type mismatch: expected str, found float",
    );
}

#[test]
fn test_call_passes_parameter_type_to_empty_list() {
    assert_type(
        "sum([])",
        ctx(&[("sum", func(Type::list(Type::Int), Type::Int))]),
        Type::Int,
    );
}

#[test]
fn test_blocks() {
    assert_eq!(block_type("{}", "void", ctx(&[])), Type::Void);
    assert_eq!(
        block_type("{\n  let x = fn () int { x() };\n  x()\n}", "int", ctx(&[])),
        Type::Int
    );

    let context = scopes(&[
        &[("f", func(Type::Int, Type::Bool))],
        &[("g", Type::Int)],
        &[("h", func(Type::Bool, Type::Char))],
    ]);
    assert_eq!(
        block_type("{\n  f(123);\n  let y = f(g);\n  h(y)\n}", "char", context.clone()),
        Type::Char
    );
    assert_eq!(
        block_type("{\n  f(123);\n  let y = f(g);\n  h(y);\n}", "void", context.clone()),
        Type::Void
    );
    assert_eq!(
        block_type("{\n  let y = f(g)\n}", "void", context),
        Type::Void
    );
}

#[test]
fn test_block_bindings_are_sequential_and_shadow() {
    assert_eq!(
        block_type("{ let a = 1; let a = \"s\"; a }", "str", ctx(&[])),
        Type::Str
    );

    let error = type_check_expr(&desugared_expr("{ b; let b = 1; }"), &ctx(&[])).unwrap_err();
    assert_eq!(error.message(), "undefined identifier: found b");
}

#[test]
fn test_block_bindings_do_not_leak() {
    let error = type_check_expr(&desugared_expr("{ { let a = 1; }; a }"), &ctx(&[])).unwrap_err();
    assert_eq!(error.message(), "undefined identifier: found a");
}

#[test]
fn test_index_expressions() {
    assert_type("list[3]", ctx(&[("list", Type::list(Type::Int))]), Type::Int);
    assert_type("\"hello\"[3]", ctx(&[]), Type::Char);
    assert_type("(\"hello\", false, 123)[0]", ctx(&[]), Type::Str);
    assert_type("(\"hello\", false, 123)[1]", ctx(&[]), Type::Bool);
    assert_type("(\"hello\", false, 123)[2]", ctx(&[]), Type::Int);
}

#[test]
fn test_index_errors() {
    assert_error(
        "(\"hello\", false, 123)[3]",
        ctx(&[]),
        Type::Void,
        "Tuple index out of range: expected int < 3, found 3",
    );
    assert_error(
        "list[no_int]",
        ctx(&[("list", Type::list(Type::Int)), ("no_int", Type::Char)]),
        Type::Int,
        "Index type mismatch: expected int, found char",
    );
    assert_error(
        "\"hello\"[no_int]",
        ctx(&[("no_int", Type::Char)]),
        Type::Char,
        "Index type mismatch: expected int, found char",
    );
    assert_error(
        "(\"hello\", false, 123)[i]",
        ctx(&[("i", Type::Int)]),
        Type::Void,
        "Invalid tuple index: only int literal is allowed for tuple index: found expr",
    );
    assert_error(
        "(\"hello\", false, 123)[no_int]",
        ctx(&[("no_int", Type::Char)]),
        Type::Void,
        "Invalid tuple index: only int literal is allowed for tuple index: found expr",
    );
    assert_error(
        "3[0]",
        ctx(&[]),
        Type::Void,
        "Indexable type mismatch: expected list, str or tuple, found int",
    );
}

#[test]
fn test_negative_tuple_index_is_not_a_literal() {
    assert_error(
        "(1, 2)[-1]",
        ctx(&[]),
        Type::Int,
        "Invalid tuple index: only int literal is allowed for tuple index: found expr",
    );
}

#[test]
fn test_index_error_positions() {
    let error = type_check_expr(&desugared_expr("3[0]"), &ctx(&[])).unwrap_err();
    assert_eq!(*error.get_position(), Position::new(1, 9));

    let error = type_check_expr(&desugared_expr("(1, 2)[2]"), &ctx(&[])).unwrap_err();
    assert_eq!(*error.get_position(), Position::new(1, 16));
}

#[test]
fn test_conditionals() {
    assert_type(
        "if some_bool { 10 } else { 20 }",
        ctx(&[("some_bool", Type::Bool)]),
        Type::Int,
    );
    assert_type(
        "if f(123) { \"hello\" } else { \"world\" }",
        ctx(&[("f", func(Type::Int, Type::Bool))]),
        Type::Str,
    );
    assert_error(
        "if some_char { 10 } else { 20 }",
        ctx(&[("some_char", Type::Char)]),
        Type::Int,
        "Type mismatch: expected bool, found char",
    );
    assert_error(
        "if some_bool { 10 } else { \"hello\" }",
        ctx(&[("some_bool", Type::Bool)]),
        Type::Int,
        "'else' block should have the same type as 'if' block: expected int, found str",
    );
    assert_error(
        "if some_bool { } else { \"hello\" }",
        ctx(&[("some_bool", Type::Bool)]),
        Type::Void,
        "'else' block should have the same type as 'if' block, ';' may be missing: expected void, found str",
    );
    assert_type(
        "if some_bool { } else { \"hello\"; }",
        ctx(&[("some_bool", Type::Bool)]),
        Type::Void,
    );
}

#[test]
fn test_conditional_branches_type_empty_lists() {
    assert_type(
        "if c { [1] } else { [] }",
        ctx(&[("c", Type::Bool)]),
        Type::list(Type::Int),
    );
}

#[test]
fn test_empty_list_takes_type_from_either_side() {
    let xs = ctx(&[("xs", Type::list(Type::Int)), ("c", Type::Bool)]);
    let infer = |source: &str| type_check_expr(&desugared_expr(source), &xs).unwrap().ty;

    assert_eq!(infer("xs == []"), Type::Bool);
    assert_eq!(infer("[] == xs"), Type::Bool);
    assert_eq!(infer("[] != [1]"), Type::Bool);
    assert_eq!(infer("if c { [1] } else { [] }"), Type::list(Type::Int));
    assert_eq!(infer("if c { [] } else { [1] }"), Type::list(Type::Int));
    assert_eq!(infer("[[1], []]"), Type::list(Type::list(Type::Int)));
    assert_eq!(infer("[[], [1]]"), Type::list(Type::list(Type::Int)));
    assert_eq!(infer("[[], [], ['a']]"), Type::list(Type::list(Type::Char)));
    assert_eq!(infer("([], 1) == (xs, 2)"), Type::Bool);

    let error = type_check_expr(&desugared_expr("[] == []"), &xs).unwrap_err();
    assert_eq!(error.message(), "Empty list type cannot be inferred: found []");

    let error = type_check_expr(&desugared_expr("[[], 1]"), &xs).unwrap_err();
    assert_eq!(error.message(), "Type mismatch: expected int, found []");
    assert_eq!(*error.get_position(), Position::new(1, 10));
}

#[test]
fn test_loops() {
    let f_int = ctx(&[("f", func(Type::Int, Type::Bool))]);
    assert_type("for x in [1, 2, 3] { f(x) }", f_int.clone(), Type::list(Type::Bool));
    assert_type("for x in [1, 2, 3] { f(x); }", f_int.clone(), Type::list(Type::Void));
    assert_error(
        "for x in [1, 2, 3] { f(x) }",
        ctx(&[("f", func(Type::Char, Type::Bool))]),
        Type::list(Type::Bool),
        "Function parameter type mismatch: expected char, found int",
    );
    assert_error(
        "for x in 123 { f(x) }",
        f_int,
        Type::list(Type::Bool),
        "Loop target should be a list: found int",
    );
}

#[test]
fn test_unary_operators() {
    assert_type("+x", ctx(&[("x", Type::Int)]), Type::Int);
    assert_type("-x", ctx(&[("x", Type::Int)]), Type::Int);
    assert_type("+x", ctx(&[("x", Type::Float)]), Type::Float);
    assert_type("-x", ctx(&[("x", Type::Float)]), Type::Float);
    assert_type("!x", ctx(&[("x", Type::Bool)]), Type::Bool);
    assert_error(
        "-x",
        ctx(&[("x", Type::Bool)]),
        Type::Bool,
        "Operand type mismatch for '-': expected int or float, found bool",
    );
    assert_error(
        "!x",
        ctx(&[("x", Type::Int)]),
        Type::Int,
        "Operand type mismatch for '!': expected bool, found int",
    );
}

#[test]
fn test_equality_operators() {
    assert_type("1 == 1", ctx(&[]), Type::Bool);
    assert_type("\"hello\" != \"hello\"", ctx(&[]), Type::Bool);
    assert_type("(1, 'a') == (2, 'b')", ctx(&[]), Type::Bool);
    assert_error(
        "\"hello\" == 3",
        ctx(&[]),
        Type::Bool,
        "Right-hand operand type mismatch for '==': expected str, found int",
    );
}

#[test]
fn test_comparison_operators() {
    assert_type("3.5 > .0", ctx(&[]), Type::Bool);
    assert_type("'c' > 'a'", ctx(&[]), Type::Bool);
    assert_error(
        "'c' < 3",
        ctx(&[]),
        Type::Bool,
        "Right-hand operand type mismatch for '<': expected char, found int",
    );
    assert_error(
        "fn () void {} <= 3",
        ctx(&[]),
        Type::Bool,
        "Left-hand operand type mismatch for '<=': expected int, float, bool, char or str, found () -> void",
    );
}

#[test]
fn test_arithmetic_operators() {
    assert_type("3 + 0", ctx(&[]), Type::Int);
    assert_type("3 * 123 / 13", ctx(&[]), Type::Int);
    assert_type("3.5 + .0", ctx(&[]), Type::Float);
    assert_type("3.5 * .0 / 1.0", ctx(&[]), Type::Float);
    assert_error(
        "3.5 * 1 / 1.0",
        ctx(&[]),
        Type::Float,
        "Right-hand operand type mismatch for '*': expected float, found int",
    );
    assert_error(
        "\"4\" | 1",
        ctx(&[]),
        Type::Int,
        "Left-hand operand type mismatch for '|': expected int or float, found str",
    );
}

#[test]
fn test_logical_operators() {
    assert_type("true && false", ctx(&[]), Type::Bool);
    assert_type("true || false", ctx(&[]), Type::Bool);
    assert_error(
        ".1 || false",
        ctx(&[]),
        Type::Bool,
        "Left-hand operand type mismatch for '||': expected bool, found float",
    );
    assert_error(
        "true && 1",
        ctx(&[]),
        Type::Bool,
        "Right-hand operand type mismatch for '&&': expected bool, found int",
    );
}

#[test]
fn test_operand_error_positions() {
    let error = type_check_expr(&desugared_expr("1 + 'c'"), &ctx(&[])).unwrap_err();
    assert_eq!(*error.get_position(), Position::new(1, 13));

    let error = type_check_expr(&desugared_expr("-true"), &ctx(&[])).unwrap_err();
    assert_eq!(*error.get_position(), Position::new(1, 10));
}

#[test]
fn test_module_programs() {
    let io = ctx(&[
        ("print", func(Type::Str, Type::Void)),
        ("i2s", func(Type::Int, Type::Str)),
    ]);

    check_program(
        "\nlet main = fn () void {\n  print(\"hello, world!\");\n}\n",
        io.clone(),
    )
    .unwrap();

    let program = check_program(
        "\nlet fac = fn (n int) int {\n  if (n == 1) {\n    1\n  } else {\n    n * fac(n - 1)\n  }\n}\n\nlet main = fn () void {\n  print(i2s(fac(10)));\n}\n",
        io,
    )
    .unwrap();
    assert_eq!(program.decls[0].ty, func(Type::Int, Type::Int));
    assert_eq!(program.decls[1].ty, func(tuple(vec![]), Type::Void));
}

#[test]
fn test_module_void_declarations() {
    let cases = [
        ("let x: void = f()", "void"),
        ("let x = f()", "void"),
        ("let x = (1, f())", "(int, void)"),
        ("let x = (1, (\"hello\", f(), false))", "(int, (str, void, bool))"),
        ("let x = [f()]", "[void]"),
    ];

    for (decl, found) in cases {
        let error = check_program(
            &format!("\nlet f = fn () void {{}}\n{}\n", decl),
            TypeContext::new(),
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("A decl type cannot contain void: found {} at 3:1", found)
        );

        let error = check_program(
            &format!("\nlet f = fn () void {{\n  {}\n}}\n", decl),
            TypeContext::new(),
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("A decl type cannot contain void: found {} at 3:3", found)
        );
    }
}

#[test]
fn test_void_parameters_do_not_depend_on_arity() {
    let module = check_program(
        "let f = fn (a void) int { 1 }\nlet g = fn (a void, b int) int { b }",
        TypeContext::new(),
    )
    .unwrap();
    assert_eq!(module.decls[0].ty, func(Type::Void, Type::Int));
    assert_eq!(
        module.decls[1].ty,
        func(tuple(vec![Type::Void, Type::Int]), Type::Int)
    );

    let error = check_program(
        "let g = fn (a void, b int) int { let c = a; b }",
        TypeContext::new(),
    )
    .unwrap_err();
    assert_eq!(error.to_string(), "A decl type cannot contain void: found void at 1:34");
}

#[test]
fn test_declared_type_guides_empty_list() {
    let program = check_program("let xs: [[str]] = [[], []]", TypeContext::new()).unwrap();
    assert_eq!(program.decls[0].ty, Type::list(Type::list(Type::Str)));
    assert_eq!(program.decls[0].declared, Some(Type::list(Type::list(Type::Str))));
}

#[test]
fn test_module_scope_shadows_context() {
    let program = check_program(
        "let print = 1\nlet y = print + 1",
        TypeContext::prelude(),
    )
    .unwrap();
    assert_eq!(program.decls[1].ty, Type::Int);
}

#[test]
fn test_undesugared_nodes_are_internal_errors() {
    let tokens = tokenize("let f = fn (a int, b int) int { a }").unwrap();
    let module = parse(tokens).unwrap();
    let error = type_check(module, TypeContext::new()).unwrap_err();
    assert_eq!(error.get_kind(), ErrorKind::Internal);
    assert!(!error.is_diagnostic());

    let tokens = tokenize("let f = g(1, 2)").unwrap();
    let module = parse(tokens).unwrap();
    let context = ctx(&[("g", func(tuple(vec![Type::Int, Type::Int]), Type::Int))]);
    let error = type_check(module, context).unwrap_err();
    assert_eq!(error.get_kind(), ErrorKind::Internal);
}

#[test]
fn test_typed_nodes_carry_types() {
    let typed = type_check_expr(&desugared_expr("f(1)"), &ctx(&[("f", func(Type::Int, Type::Str))]))
        .unwrap();
    assert_eq!(typed.ty, Type::Str);
    let TypedExprKind::Call { callee, arg } = typed.kind else {
        panic!("expected call");
    };
    assert_eq!(callee.ty, func(Type::Int, Type::Str));
    assert_eq!(arg.ty, Type::Int);
}

#[test]
fn test_context_scopes_are_persistent() {
    let mut root = TypeContext::new();
    root.bind("a", Type::Int);

    let mut left = root.push_scope();
    let right = root.push_scope();
    left.bind("b", Type::Str);

    assert_eq!(left.lookup("a"), Some(&Type::Int));
    assert_eq!(left.lookup("b"), Some(&Type::Str));
    assert_eq!(right.lookup("b"), None);
    assert_eq!(left.depth(), 2);

    let popped = left.pop_scope().unwrap();
    assert_eq!(popped.lookup("b"), None);
    assert_eq!(popped.depth(), 1);
    assert!(popped.pop_scope().is_none());
}

#[test]
fn test_context_bind_copies_shared_frames() {
    let mut first = TypeContext::new();
    first.bind("a", Type::Int);
    let mut second = first.clone();
    second.bind("a", Type::Str);
    second.bind("b", Type::Bool);

    assert_eq!(first.lookup("a"), Some(&Type::Int));
    assert_eq!(first.lookup("b"), None);
    assert_eq!(second.lookup("a"), Some(&Type::Str));
}

#[test]
fn test_prelude_bindings() {
    let prelude = TypeContext::prelude();
    assert_eq!(prelude.lookup("print"), Some(&func(Type::Str, Type::Void)));
    assert_eq!(prelude.lookup("i2s"), Some(&func(Type::Int, Type::Str)));
    assert_eq!(prelude.lookup("f2s"), Some(&func(Type::Float, Type::Str)));
    assert_eq!(prelude.lookup("c2s"), Some(&func(Type::Char, Type::Str)));
    assert_eq!(prelude.lookup("b2s"), Some(&func(Type::Bool, Type::Str)));
    assert_eq!(TypeContext::new().lookup("print"), None);
}
