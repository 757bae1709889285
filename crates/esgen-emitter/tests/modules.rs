//! Module import/export rendering from ESTree JSON.
//!
//! Covers the old-draft module forms the tree carries: import clauses with
//! default and named specifiers, every export shape, and the `module id
//! from` declaration.

use esgen_ast::Node;
use esgen_emitter::{Options, generate};

fn parse(json: &str) -> Node {
    serde_json::from_str(json).expect("node should deserialize")
}

fn render(json: &str) -> String {
    generate(&parse(json), &Options::default()).unwrap()
}

fn render_minified(json: &str) -> String {
    generate(&parse(json), &Options::minify()).unwrap()
}

fn program(statement: &str) -> String {
    format!(r#"{{"type": "Program", "body": [{statement}]}}"#)
}

fn source() -> &'static str {
    r#"{"type": "Literal", "value": "mod"}"#
}

fn import(specifiers: &str) -> String {
    program(&format!(
        r#"{{"type": "ImportDeclaration", "specifiers": [{specifiers}], "source": {}}}"#,
        source()
    ))
}

fn named(id: &str) -> String {
    format!(r#"{{"id": {{"type": "Identifier", "name": "{id}"}}}}"#)
}

fn renamed(id: &str, name: &str) -> String {
    format!(
        r#"{{"id": {{"type": "Identifier", "name": "{id}"}},
            "name": {{"type": "Identifier", "name": "{name}"}}}}"#
    )
}

fn default_binding(id: &str) -> String {
    format!(r#"{{"id": {{"type": "Identifier", "name": "{id}"}}, "default": true}}"#)
}

#[test]
fn test_bare_import() {
    assert_eq!(render(&import("")), "import 'mod';");
    assert_eq!(render_minified(&import("")), "import'mod'");
}

#[test]
fn test_default_import_binding() {
    assert_eq!(render(&import(&default_binding("d"))), "import d from 'mod';");
    assert_eq!(render_minified(&import(&default_binding("d"))), "import d from'mod'");
}

#[test]
fn test_single_named_import_stays_inline() {
    assert_eq!(render(&import(&named("a"))), "import { a } from 'mod';");
    assert_eq!(render(&import(&renamed("b", "c"))), "import { b as c } from 'mod';");
}

#[test]
fn test_multiple_named_imports_go_multiline() {
    let specifiers = format!("{}, {}", named("a"), renamed("b", "c"));
    assert_eq!(render(&import(&specifiers)), "import {\n    a,\n    b as c\n} from 'mod';");
    assert_eq!(render_minified(&import(&specifiers)), "import{a,b as c}from'mod'");
}

#[test]
fn test_mixed_default_and_named_imports() {
    let specifiers = format!("{}, {}, {}", default_binding("d"), named("a"), renamed("b", "c"));
    assert_eq!(
        render(&import(&specifiers)),
        "import d, {\n    a,\n    b as c\n} from 'mod';"
    );
    assert_eq!(render_minified(&import(&specifiers)), "import d,{a,b as c}from'mod'");
}

#[test]
fn test_export_default_expression() {
    let json = program(
        r#"{"type": "ExportDeclaration", "default": true,
            "declaration": {"type": "Literal", "value": 42}}"#,
    );
    assert_eq!(render(&json), "export default 42;");
    assert_eq!(render_minified(&json), "export default 42");
}

#[test]
fn test_export_default_function_declaration() {
    let json = program(
        r#"{"type": "ExportDeclaration", "default": true,
            "declaration": {"type": "FunctionDeclaration",
                            "id": {"type": "Identifier", "name": "f"},
                            "params": [],
                            "body": {"type": "BlockStatement", "body": []}}}"#,
    );
    assert_eq!(render(&json), "export default function f() {\n};");
}

#[test]
fn test_export_declaration_statement() {
    let json = program(
        r#"{"type": "ExportDeclaration",
            "declaration": {"type": "VariableDeclaration", "kind": "var",
                            "declarations": [
                                {"type": "VariableDeclarator",
                                 "id": {"type": "Identifier", "name": "x"},
                                 "init": {"type": "Literal", "value": 1}}
                            ]}}"#,
    );
    assert_eq!(render(&json), "export var x = 1;");
    assert_eq!(render_minified(&json), "export var x=1");
}

#[test]
fn test_export_empty_clause() {
    let json = program(r#"{"type": "ExportDeclaration", "specifiers": []}"#);
    assert_eq!(render(&json), "export { };");
    assert_eq!(render_minified(&json), "export{}");
}

#[test]
fn test_export_named_specifiers() {
    let json = program(
        r#"{"type": "ExportDeclaration", "specifiers": [
            {"type": "ExportSpecifier", "id": {"type": "Identifier", "name": "a"}},
            {"type": "ExportSpecifier",
             "id": {"type": "Identifier", "name": "b"},
             "name": {"type": "Identifier", "name": "c"}}
        ]}"#,
    );
    assert_eq!(render(&json), "export {\n    a,\n    b as c\n};");
    assert_eq!(render_minified(&json), "export{a,b as c}");
}

#[test]
fn test_export_named_specifiers_with_source() {
    let json = program(&format!(
        r#"{{"type": "ExportDeclaration", "specifiers": [
            {{"type": "ExportSpecifier", "id": {{"type": "Identifier", "name": "a"}}}}
        ], "source": {}}}"#,
        source()
    ));
    assert_eq!(render(&json), "export {\n    a\n} from 'mod';");
}

#[test]
fn test_export_batch() {
    let json = program(&format!(
        r#"{{"type": "ExportDeclaration",
            "specifiers": [{{"type": "ExportBatchSpecifier"}}],
            "source": {}}}"#,
        source()
    ));
    assert_eq!(render(&json), "export * from 'mod';");
    assert_eq!(render_minified(&json), "export*from'mod'");
}

#[test]
fn test_module_declaration() {
    let json = program(&format!(
        r#"{{"type": "ModuleDeclaration",
            "id": {{"type": "Identifier", "name": "m"}},
            "source": {}}}"#,
        source()
    ));
    assert_eq!(render(&json), "module m from 'mod';");
    assert_eq!(render_minified(&json), "module m from'mod'");
}

#[test]
fn test_imports_mix_with_plain_statements() {
    let json = format!(
        r#"{{"type": "Program", "body": [
            {{"type": "ImportDeclaration",
              "specifiers": [{}],
              "source": {}}},
            {{"type": "ExpressionStatement",
              "expression": {{"type": "CallExpression",
                              "callee": {{"type": "Identifier", "name": "run"}},
                              "arguments": []}}}}
        ]}}"#,
        default_binding("d"),
        source()
    );
    assert_eq!(render(&json), "import d from 'mod';\nrun();");
}
