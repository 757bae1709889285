//! Option-driven layout behavior.
//!
//! Each test runs the same trees under different `Options` values and
//! checks the exact output: indentation shape, newline and space strings,
//! quoting, numeric rewriting, semicolon and parenthesis policies, and the
//! raw-literal passthrough.

use esgen_ast::{LiteralValue, Node};
use esgen_emitter::{
    FORMAT_DEFAULTS, FORMAT_MINIFY, Format, IndentBase, Options, Quotes, generate,
    generate_expression,
};

fn parse(json: &str) -> Node {
    serde_json::from_str(json).expect("node should deserialize")
}

fn gen_with(json: &str, options: &Options) -> String {
    generate(&parse(json), options).unwrap()
}

fn call_stmt(name: &str) -> String {
    format!(
        r#"{{"type": "ExpressionStatement",
            "expression": {{"type": "CallExpression",
                            "callee": {{"type": "Identifier", "name": "{name}"}},
                            "arguments": []}}}}"#
    )
}

fn two_call_program() -> String {
    format!(r#"{{"type": "Program", "body": [{}, {}]}}"#, call_stmt("a"), call_stmt("b"))
}

fn nested_if() -> String {
    format!(
        r#"{{"type": "Program", "body": [
            {{"type": "IfStatement",
              "test": {{"type": "Identifier", "name": "x"}},
              "consequent": {{"type": "BlockStatement", "body": [{}]}}}}
        ]}}"#,
        call_stmt("a")
    )
}

fn string_stmt(value: &str) -> String {
    format!(
        r#"{{"type": "Program", "body": [
            {{"type": "ExpressionStatement",
              "expression": {{"type": "Literal", "value": {value}}}}}
        ]}}"#
    )
}

fn number_expr(value: f64) -> esgen_ast::Expression {
    esgen_ast::Expression::number(value)
}

#[test]
fn test_default_layout_uses_four_space_indent() {
    assert_eq!(gen_with(&nested_if(), &Options::default()), "if (x) {\n    a();\n}");
}

#[test]
fn test_indent_style_option_replaces_the_unit() {
    let mut options = Options::default();
    options.format.indent.style = "\t".to_string();
    assert_eq!(gen_with(&nested_if(), &options), "if (x) {\n\ta();\n}");
}

#[test]
fn test_legacy_indent_alias_wins_over_format_style() {
    let options = Options { indent: Some("  ".to_string()), ..Options::default() };
    assert_eq!(gen_with(&nested_if(), &options), "if (x) {\n  a();\n}");
}

#[test]
fn test_indent_base_shifts_every_line() {
    let mut options = Options::default();
    options.format.indent.base = 1;
    assert_eq!(gen_with(&two_call_program(), &options), "    a();\n    b();");

    let literal = Options {
        base: Some(IndentBase::Literal(">>".to_string())),
        ..Options::default()
    };
    assert_eq!(gen_with(&two_call_program(), &literal), ">>a();\n>>b();");
}

#[test]
fn test_newline_option_rewrites_line_breaks() {
    let mut options = Options::default();
    options.format.newline = "\r\n".to_string();
    assert_eq!(gen_with(&two_call_program(), &options), "a();\r\nb();");
    assert_eq!(gen_with(&nested_if(), &options), "if (x) {\r\n    a();\r\n}");
}

#[test]
fn test_empty_space_keeps_the_mandatory_separator() {
    let mut options = Options::default();
    options.format.space = String::new();

    // The optional space between `if` and `(` drops; the separator between
    // `var` and its binding cannot.
    assert_eq!(gen_with(&nested_if(), &options), "if(x){\n    a();\n}");

    let decl = r#"{"type": "Program", "body": [
        {"type": "VariableDeclaration", "kind": "var",
         "declarations": [{"type": "VariableDeclarator",
                           "id": {"type": "Identifier", "name": "x"},
                           "init": {"type": "Literal", "value": 1}}]}
    ]}"#;
    assert_eq!(gen_with(decl, &options), "var x=1;");
}

#[test]
fn test_compact_clears_all_layout() {
    let mut options = Options::default();
    options.format.compact = true;
    assert_eq!(gen_with(&nested_if(), &options), "if(x){a();}");
    assert_eq!(gen_with(&two_call_program(), &options), "a();b();");
}

#[test]
fn test_quote_policies() {
    let plain = string_stmt(r#""it's""#);
    assert_eq!(gen_with(&plain, &Options::default()), r"'it\'s';");

    let mut double = Options::default();
    double.format.quotes = Quotes::Double;
    assert_eq!(gen_with(&plain, &double), "\"it's\";");

    // Auto picks whichever quote needs fewer escapes.
    let mut auto = Options::default();
    auto.format.quotes = Quotes::Auto;
    assert_eq!(gen_with(&plain, &auto), "\"it's\";");
    assert_eq!(gen_with(&string_stmt(r#""say \"hi\"""#), &auto), "'say \"hi\"';");
}

#[test]
fn test_json_mode_forces_double_quotes_and_slash_escapes() {
    let mut options = Options::default();
    options.format.json = true;
    options.format.quotes = Quotes::Single;
    assert_eq!(gen_with(&string_stmt(r#""a/b""#), &options), r#""a\/b";"#);
}

#[test]
fn test_renumber_produces_shortest_forms() {
    let mut options = Options::default();
    options.format.renumber = true;
    assert_eq!(generate_expression(&number_expr(100000.0), &options).unwrap(), "1e5");
    assert_eq!(generate_expression(&number_expr(0.000001), &options).unwrap(), "1e-6");
    assert_eq!(generate_expression(&number_expr(0.5), &options).unwrap(), ".5");

    // Without renumber the canonical decimal stays.
    let defaults = Options::default();
    assert_eq!(generate_expression(&number_expr(100000.0), &defaults).unwrap(), "100000");
}

#[test]
fn test_hexadecimal_applies_only_outside_json_mode() {
    let mut options = Options::default();
    options.format.renumber = true;
    options.format.hexadecimal = true;
    let big = 1125899906842624.0; // 2^50
    assert_eq!(generate_expression(&number_expr(big), &options).unwrap(), "0x4000000000000");

    options.format.json = true;
    assert_eq!(
        generate_expression(&number_expr(big), &options).unwrap(),
        "1125899906842624"
    );
}

#[test]
fn test_escapeless_passes_printables_through() {
    let cafe = string_stmt(r#""café""#);
    assert_eq!(gen_with(&cafe, &Options::default()), r"'caf\xE9';");

    let mut options = Options::default();
    options.format.escapeless = true;
    assert_eq!(gen_with(&cafe, &options), "'caf\u{E9}';");
}

#[test]
fn test_semicolon_policy_drops_only_covered_slots() {
    let mut options = Options::default();
    options.format.semicolons = false;
    assert_eq!(gen_with(&two_call_program(), &options), "a();\nb()");
    // Inside a block the last slot is covered too.
    assert_eq!(gen_with(&nested_if(), &options), "if (x) {\n    a()\n}");
}

#[test]
fn test_parentheses_policy_controls_empty_new_arguments() {
    let ctor = r#"{"type": "NewExpression",
        "callee": {"type": "Identifier", "name": "Ctor"}, "arguments": []}"#;
    assert_eq!(gen_with(ctor, &Options::default()), "new Ctor()");

    let mut options = Options::default();
    options.format.parentheses = false;
    assert_eq!(gen_with(ctor, &options), "new Ctor");
}

#[test]
fn test_raw_literal_passthrough_round_trips_through_the_hook() {
    fn parse_number(raw: &str) -> Option<LiteralValue> {
        raw.trim().parse::<f64>().ok().map(LiteralValue::Number)
    }

    let literal = r#"{"type": "Literal", "value": 1, "raw": "1.0"}"#;
    let hooked = Options { parse: Some(parse_number), ..Options::default() };
    assert_eq!(gen_with(literal, &hooked), "1.0");

    // Without the hook the raw text is not trusted.
    assert_eq!(gen_with(literal, &Options::default()), "1");

    // `raw: false` disables the passthrough outright.
    let disabled = Options { parse: Some(parse_number), raw: false, ..Options::default() };
    assert_eq!(gen_with(literal, &disabled), "1");
}

#[test]
fn test_presets_are_the_documented_configurations() {
    assert_eq!(*FORMAT_DEFAULTS, Format::default());
    assert_eq!(*FORMAT_MINIFY, Format::minify());
    assert_eq!(Options::minify().format, *FORMAT_MINIFY);
}

#[test]
fn test_minified_output_is_stable_across_calls() {
    let json = nested_if();
    let options = Options::minify();
    let first = gen_with(&json, &options);
    assert_eq!(first, "if(x){a()}");
    assert_eq!(gen_with(&json, &options), first);
}
