//! ESTree-shaped abstract syntax tree for the esgen code generator.
//!
//! This crate defines the node types the generator consumes:
//! - Expression and statement nodes (`Expression`, `Statement`, `Node`)
//! - Operator enums with their source spellings and precedence ranks
//! - Literal values, including regular expressions and raw source text
//! - Precedence ranks used for parenthesization decisions
//!
//! Nodes deserialize from ESTree JSON via serde: each node object carries a
//! `"type"` tag, and a handful of historical shape variations (multiple catch
//! handler fields, regex literals, array holes) are normalized on the way in
//! so the generator only ever sees one canonical form.

// Node definitions and serde ingestion
pub mod ast;
pub use ast::{
    AssignmentOperator, BinaryOperator, CatchClause, ClassBody, ComprehensionBlock,
    DeclarationKind, ExportSpecifier, Expression, ForInit, Function, Ident, ImportSpecifier,
    Literal, LiteralValue, LogicalOperator, MethodDefinition, Node, Property, PropertyKind,
    Statement, SwitchCase, TemplateElement, TemplateElementValue, TemplateLiteral, TryStatement,
    UnaryOperator, UpdateOperator, VariableDeclaration, VariableDeclarator,
};

// Operator precedence ranks
pub mod precedence;
pub use precedence::Precedence;
