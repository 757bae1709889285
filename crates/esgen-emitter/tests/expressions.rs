//! End-to-end expression rendering.
//!
//! Each test deserializes an ESTree JSON fragment and checks the exact
//! generated source, covering precedence parenthesization, token-boundary
//! spacing, and the call/`new`/member permission threading.

use esgen_ast::{Expression, Precedence};
use esgen_emitter::{CodegenError, MAX_CODEGEN_DEPTH, Options, generate_expression};

fn parse(json: &str) -> Expression {
    serde_json::from_str(json).expect("expression should deserialize")
}

fn render(json: &str) -> String {
    generate_expression(&parse(json), &Options::default()).unwrap()
}

fn render_minified(json: &str) -> String {
    generate_expression(&parse(json), &Options::minify()).unwrap()
}

fn binary(operator: &str, left: &str, right: &str) -> String {
    format!(
        r#"{{"type": "BinaryExpression", "operator": "{operator}",
            "left": {left}, "right": {right}}}"#
    )
}

fn ident(name: &str) -> String {
    format!(r#"{{"type": "Identifier", "name": "{name}"}}"#)
}

fn number(value: &str) -> String {
    format!(r#"{{"type": "Literal", "value": {value}}}"#)
}

#[test]
fn test_precedence_drives_parenthesization() {
    let a_plus_b = binary("+", &ident("a"), &ident("b"));

    let grouped = binary("*", &a_plus_b, &ident("c"));
    assert_eq!(render(&grouped), "(a + b) * c");
    assert_eq!(render_minified(&grouped), "(a+b)*c");

    let natural = binary("+", &ident("a"), &binary("*", &ident("b"), &ident("c")));
    assert_eq!(render(&natural), "a + b * c");
}

#[test]
fn test_left_associative_right_operand_parenthesized() {
    let nested = binary("-", &ident("a"), &binary("-", &ident("b"), &ident("c")));
    assert_eq!(render(&nested), "a - (b - c)");

    let flat = binary("-", &binary("-", &ident("a"), &ident("b")), &ident("c"));
    assert_eq!(render(&flat), "a - b - c");
}

#[test]
fn test_logical_operator_nesting() {
    let natural = format!(
        r#"{{"type": "LogicalExpression", "operator": "||",
            "left": {},
            "right": {{"type": "LogicalExpression", "operator": "&&",
                       "left": {}, "right": {}}}}}"#,
        ident("a"),
        ident("b"),
        ident("c")
    );
    assert_eq!(render(&natural), "a || b && c");

    let grouped = format!(
        r#"{{"type": "LogicalExpression", "operator": "&&",
            "left": {{"type": "LogicalExpression", "operator": "||",
                      "left": {}, "right": {}}},
            "right": {}}}"#,
        ident("a"),
        ident("b"),
        ident("c")
    );
    assert_eq!(render(&grouped), "(a || b) && c");
}

#[test]
fn test_conditional_in_test_position_needs_parens() {
    let json = format!(
        r#"{{"type": "ConditionalExpression",
            "test": {{"type": "ConditionalExpression",
                      "test": {}, "consequent": {}, "alternate": {}}},
            "consequent": {}, "alternate": {}}}"#,
        ident("a"),
        ident("b"),
        ident("c"),
        ident("d"),
        ident("e")
    );
    assert_eq!(render(&json), "(a ? b : c) ? d : e");
    assert_eq!(render_minified(&json), "(a?b:c)?d:e");
}

#[test]
fn test_assignment_below_binary_slot() {
    let json = binary(
        "+",
        &format!(
            r#"{{"type": "AssignmentExpression", "operator": "=",
                "left": {}, "right": {}}}"#,
            ident("a"),
            ident("b")
        ),
        &ident("c"),
    );
    assert_eq!(render(&json), "(a = b) + c");
}

#[test]
fn test_sequence_in_argument_position() {
    let json = format!(
        r#"{{"type": "CallExpression", "callee": {},
            "arguments": [
                {{"type": "SequenceExpression", "expressions": [{}, {}]}},
                {}
            ]}}"#,
        ident("f"),
        ident("a"),
        ident("b"),
        ident("c")
    );
    assert_eq!(render(&json), "f((a, b), c)");
}

#[test]
fn test_member_call_chain() {
    let json = format!(
        r#"{{"type": "MemberExpression", "computed": false,
            "object": {{"type": "CallExpression",
                        "callee": {{"type": "MemberExpression", "computed": false,
                                    "object": {}, "property": {}}},
                        "arguments": [{}]}},
            "property": {}}}"#,
        ident("a"),
        ident("b"),
        ident("c"),
        ident("d")
    );
    assert_eq!(render(&json), "a.b(c).d");
}

#[test]
fn test_call_in_new_callee_is_wrapped() {
    let json = format!(
        r#"{{"type": "NewExpression",
            "callee": {{"type": "CallExpression", "callee": {}, "arguments": []}},
            "arguments": []}}"#,
        ident("factory")
    );
    assert_eq!(render(&json), "new (factory())()");
}

#[test]
fn test_nested_new_without_parentheses_option() {
    let json = format!(
        r#"{{"type": "NewExpression",
            "callee": {{"type": "NewExpression", "callee": {}, "arguments": []}},
            "arguments": []}}"#,
        ident("A")
    );
    assert_eq!(render(&json), "new new A()()");

    let mut options = Options::default();
    options.format.parentheses = false;
    assert_eq!(generate_expression(&parse(&json), &options).unwrap(), "new new A");
}

#[test]
fn test_update_expression_plus_run_keeps_space() {
    let json = binary(
        "+",
        &format!(
            r#"{{"type": "UpdateExpression", "operator": "++",
                "argument": {}, "prefix": false}}"#,
            ident("i")
        ),
        &ident("j"),
    );
    assert_eq!(render(&json), "i++ + j");
    // Even minified: `i+++j` would reparse as `(i++)+j` only by luck of the
    // maximal munch, and `i++ ++j` style runs are outright errors.
    assert_eq!(render_minified(&json), "i++ +j");
}

#[test]
fn test_unary_minus_run_keeps_space() {
    let json = binary(
        "-",
        &ident("a"),
        &format!(
            r#"{{"type": "UnaryExpression", "operator": "-", "argument": {}}}"#,
            ident("b")
        ),
    );
    assert_eq!(render(&json), "a - -b");
    assert_eq!(render_minified(&json), "a- -b");
}

#[test]
fn test_typeof_fuses_with_non_identifier_argument() {
    let json = r#"{"type": "UnaryExpression", "operator": "typeof",
        "argument": {"type": "ArrayExpression", "elements": []}}"#;
    assert_eq!(render(json), "typeof []");
    assert_eq!(render_minified(json), "typeof[]");

    let named = format!(
        r#"{{"type": "UnaryExpression", "operator": "typeof", "argument": {}}}"#,
        ident("x")
    );
    assert_eq!(render_minified(&named), "typeof x");
}

#[test]
fn test_division_before_regex_keeps_space() {
    let json = binary(
        "/",
        &ident("a"),
        r#"{"type": "Literal", "value": {}, "regex": {"pattern": "re", "flags": ""}}"#,
    );
    assert_eq!(render(&json), "a / /re/");
    assert_eq!(render_minified(&json), "a/ /re/");
}

#[test]
fn test_in_operator_parenthesized_recovers_it() {
    // `in` is fine in a plain slot.
    let json = binary("in", &ident("key"), &ident("obj"));
    assert_eq!(render(&json), "key in obj");
}

#[test]
fn test_member_of_integer_literal_keeps_second_dot() {
    let member = |value: &str| {
        format!(
            r#"{{"type": "MemberExpression", "computed": false,
                "object": {}, "property": {}}}"#,
            number(value),
            ident("toString")
        )
    };
    assert_eq!(render(&member("1")), "1..toString");
    assert_eq!(render(&member("1.5")), "1.5.toString");
    assert_eq!(render(&member("10")), "10..toString");
}

#[test]
fn test_arrow_function_forms() {
    let shorthand = format!(
        r#"{{"type": "ArrowFunctionExpression",
            "params": [{}], "defaults": [], "body": {}}}"#,
        ident("x"),
        binary("*", &ident("x"), &number("2"))
    );
    assert_eq!(render(&shorthand), "x => x * 2");
    assert_eq!(render_minified(&shorthand), "x=>x*2");

    let pair = format!(
        r#"{{"type": "ArrowFunctionExpression",
            "params": [{}, {}], "defaults": [], "body": {}}}"#,
        ident("a"),
        ident("b"),
        ident("a")
    );
    assert_eq!(render(&pair), "(a, b) => a");

    // An object body would parse as a block without the wrap.
    let object_body = r#"{"type": "ArrowFunctionExpression",
        "params": [], "defaults": [],
        "body": {"type": "ObjectExpression", "properties": []}}"#;
    assert_eq!(render(object_body), "() => ({})");
}

#[test]
fn test_function_expression_with_defaults_and_rest() {
    let json = format!(
        r#"{{"type": "FunctionExpression", "id": null,
            "params": [{}, {}],
            "defaults": [null, {}],
            "rest": {{"type": "Identifier", "name": "rest"}},
            "body": {{"type": "BlockStatement", "body": []}}}}"#,
        ident("a"),
        ident("b"),
        number("1")
    );
    assert_eq!(render(&json), "function (a, b = 1, ...rest) {\n}");
}

#[test]
fn test_yield_forms() {
    let bare = r#"{"type": "YieldExpression", "argument": null, "delegate": false}"#;
    assert_eq!(render(bare), "yield");

    let delegated = format!(
        r#"{{"type": "YieldExpression", "argument": {}, "delegate": true}}"#,
        ident("gen")
    );
    assert_eq!(render(&delegated), "yield* gen");
}

#[test]
fn test_template_literal_interpolation() {
    let json = format!(
        r#"{{"type": "TemplateLiteral",
            "quasis": [
                {{"type": "TemplateElement",
                  "value": {{"raw": "a", "cooked": "a"}}, "tail": false}},
                {{"type": "TemplateElement",
                  "value": {{"raw": "b", "cooked": "b"}}, "tail": true}}
            ],
            "expressions": [{}]}}"#,
        ident("x")
    );
    assert_eq!(render(&json), "`a${ x }b`");
    assert_eq!(render_minified(&json), "`a${x}b`");
}

#[test]
fn test_tagged_template() {
    let json = format!(
        r#"{{"type": "TaggedTemplateExpression",
            "tag": {},
            "quasi": {{"type": "TemplateLiteral",
                       "quasis": [{{"type": "TemplateElement",
                                    "value": {{"raw": "lit", "cooked": "lit"}},
                                    "tail": true}}],
                       "expressions": []}}}}"#,
        ident("tag")
    );
    assert_eq!(render(&json), "tag`lit`");
}

#[test]
fn test_object_literal_layout() {
    let json = format!(
        r#"{{"type": "ObjectExpression", "properties": [
            {{"type": "Property", "kind": "init", "key": {}, "value": {},
              "shorthand": false, "computed": false}},
            {{"type": "Property", "kind": "init", "key": {}, "value": {},
              "shorthand": true, "computed": false}}
        ]}}"#,
        ident("a"),
        number("1"),
        ident("b"),
        ident("b")
    );
    assert_eq!(render(&json), "{\n    a: 1,\n    b\n}");
    assert_eq!(render_minified(&json), "{a:1,b}");
}

#[test]
fn test_computed_property_key() {
    let json = format!(
        r#"{{"type": "ObjectExpression", "properties": [
            {{"type": "Property", "kind": "init", "key": {}, "value": {},
              "shorthand": false, "computed": true}}
        ]}}"#,
        ident("k"),
        number("1")
    );
    assert_eq!(render(&json), "{\n    [k]: 1\n}");
}

#[test]
fn test_accessor_properties() {
    let json = format!(
        r#"{{"type": "ObjectExpression", "properties": [
            {{"type": "Property", "kind": "get", "key": {},
              "value": {{"type": "FunctionExpression", "id": null, "params": [],
                         "defaults": [],
                         "body": {{"type": "BlockStatement", "body": []}}}},
              "shorthand": false, "computed": false}}
        ]}}"#,
        ident("x")
    );
    assert_eq!(render(&json), "{\n    get x() {\n    }\n}");
}

#[test]
fn test_array_holes_keep_trailing_comma() {
    let json = format!(
        r#"{{"type": "ArrayExpression", "elements": [null, {}, null]}}"#,
        ident("a")
    );
    assert_eq!(render_minified(&json), "[,a,,]");
}

#[test]
fn test_spread_in_call() {
    let json = format!(
        r#"{{"type": "CallExpression", "callee": {},
            "arguments": [{{"type": "SpreadElement", "argument": {}}}]}}"#,
        ident("f"),
        ident("args")
    );
    assert_eq!(render(&json), "f(...args)");
}

#[test]
fn test_comprehension_round_trip() {
    let json = format!(
        r#"{{"type": "ComprehensionExpression",
            "body": {},
            "blocks": [{{"type": "ComprehensionBlock", "left": {},
                         "right": {}, "of": true}}],
            "filter": {}}}"#,
        ident("x"),
        ident("x"),
        ident("xs"),
        ident("keep")
    );
    assert_eq!(render(&json), "[for (x of xs) if (keep) x]");
}

#[test]
fn test_verbatim_content_is_wrapped_per_declared_precedence() {
    let call = Expression::CallExpression {
        callee: Box::new(Expression::identifier("f")),
        arguments: vec![Expression::Verbatim {
            content: "a, b".to_string(),
            precedence: Some(Precedence::SEQUENCE),
        }],
    };
    assert_eq!(generate_expression(&call, &Options::default()).unwrap(), "f((a, b))");

    let tight = Expression::CallExpression {
        callee: Box::new(Expression::identifier("f")),
        arguments: vec![Expression::Verbatim {
            content: "a + b".to_string(),
            precedence: Some(Precedence::ADDITIVE),
        }],
    };
    assert_eq!(generate_expression(&tight, &Options::default()).unwrap(), "f(a + b)");
}

#[test]
fn test_nan_literal_is_rejected() {
    let expr = Expression::number(f64::NAN);
    let err = generate_expression(&expr, &Options::default()).unwrap_err();
    assert!(matches!(err, CodegenError::NanLiteral));
}

#[test]
fn test_negative_literal_is_rejected() {
    let expr = Expression::number(-1.0);
    let err = generate_expression(&expr, &Options::default()).unwrap_err();
    assert!(matches!(err, CodegenError::NegativeLiteral { .. }));
}

#[test]
fn test_nesting_depth_is_bounded() {
    let mut expr = Expression::identifier("x");
    for _ in 0..=MAX_CODEGEN_DEPTH {
        expr = Expression::UnaryExpression {
            operator: esgen_ast::UnaryOperator::LogicalNot,
            argument: Box::new(expr),
        };
    }
    let err = generate_expression(&expr, &Options::default()).unwrap_err();
    assert!(matches!(err, CodegenError::NestingTooDeep { limit } if limit == MAX_CODEGEN_DEPTH));
}
