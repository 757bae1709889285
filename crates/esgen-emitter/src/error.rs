//! Code generation errors.
//!
//! Every failure surfaces before any output is returned; there is no partial
//! output on error.

use thiserror::Error;

/// Result alias used throughout the generator.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Fatal conditions the generator refuses to serialize.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    /// NaN has no literal form; the tree must carry `NaN` as an identifier
    /// or `0/0` instead.
    #[error("numeric literal whose value is NaN")]
    NanLiteral,

    /// Negative values (including negative zero) have no literal form in
    /// the grammar; parsers represent them as unary minus over a positive
    /// literal.
    #[error("numeric literal whose value is negative: {value}")]
    NegativeLiteral { value: f64 },

    /// The tree nests deeper than the configured recursion bound.
    #[error("syntax tree nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: u32 },
}
