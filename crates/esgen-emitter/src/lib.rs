//! JavaScript source generation from ESTree-shaped syntax trees.
//!
//! This crate renders the node types of `esgen-ast` back into JavaScript
//! text:
//! - `generate` dispatches a whole `Node`; `generate_expression` and
//!   `generate_statement` render a single root of known kind
//! - `Options`/`Format` control layout (indentation, newlines, spacing,
//!   quoting, minification) and semantic knobs (renumbering, raw literal
//!   reuse, directive handling, safe concatenation)
//! - Output is parenthesized from operator precedence alone, spaced only
//!   where the token pair demands it, and stripped of optional semicolons
//!   when a `Format` without them asks for it
//!
//! Generation is a pure function of tree and options. Every call builds its
//! own render state, so sharing trees or option structs across threads
//! needs no locking. Hostile nesting depth is cut off with a structured
//! error at [`MAX_CODEGEN_DEPTH`] instead of a stack overflow.

// Render engine and per-node emit methods
mod emitter;
pub use emitter::MAX_CODEGEN_DEPTH;

// Fatal generation errors
pub mod error;
pub use error::{CodegenError, Result};

// Layout and behavior options, plus their resolved per-call view
pub mod options;
pub use options::{
    FORMAT_DEFAULTS, FORMAT_MINIFY, Format, IndentBase, IndentOptions, Options, ParseCallback,
    Quotes,
};

// Re-exported so verbatim precedence hints can be built without a direct
// esgen-ast dependency.
pub use esgen_ast::Precedence;

use esgen_ast::{Expression, Node, Statement};

use crate::emitter::{ExprContext, Generator, StmtContext};
use crate::options::ResolvedOptions;

/// Renders a tree to JavaScript source.
///
/// Statements (including whole `Program` nodes) and expressions take
/// different root contexts; the `Node` wrapper picks the right one.
pub fn generate(node: &Node, options: &Options) -> Result<String> {
    match node {
        Node::Statement(statement) => generate_statement(statement, options),
        Node::Expression(expression) => generate_expression(expression, options),
    }
}

/// Renders a single expression root.
pub fn generate_expression(expression: &Expression, options: &Options) -> Result<String> {
    tracing::debug!(root = "expression", "generate");
    let mut generator = Generator::new(ResolvedOptions::resolve(options));
    generator.expression(expression, Precedence::SEQUENCE, ExprContext::all())
}

/// Renders a single statement root.
pub fn generate_statement(statement: &Statement, options: &Options) -> Result<String> {
    tracing::debug!(root = "statement", "generate");
    let mut generator = Generator::new(ResolvedOptions::resolve(options));
    generator.statement(statement, StmtContext::default())
}
