//! Operator precedence ranks used for parenthesization decisions.
//!
//! Ranks mirror the ECMAScript expression grammar: a child expression printed
//! into a slot that demands at least rank `n` is wrapped in parentheses when
//! its own rank is lower. Several productions share a rank (`yield` with
//! assignment, the conditional operator with arrow functions), so ranks are
//! associated constants on a thin numeric wrapper rather than enum variants.

use serde::Deserialize;

/// Precedence rank of an expression production.
///
/// Higher ranks bind tighter: [`Precedence::SEQUENCE`] (the comma operator)
/// is the loosest production, [`Precedence::PRIMARY`] the tightest. Ordering
/// comparisons between ranks decide parenthesization, so the wrapper derives
/// `Ord` over the raw rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct Precedence(pub u8);

impl Precedence {
    /// Comma operator: `a, b`.
    pub const SEQUENCE: Precedence = Precedence(0);
    /// `yield` / `yield*`. Shares a rank with assignment.
    pub const YIELD: Precedence = Precedence(1);
    /// Assignment operators: `=`, `+=`, and friends.
    pub const ASSIGNMENT: Precedence = Precedence(1);
    /// Conditional operator: `a ? b : c`.
    pub const CONDITIONAL: Precedence = Precedence(2);
    /// Arrow functions. Shares a rank with the conditional operator.
    pub const ARROW_FUNCTION: Precedence = Precedence(2);
    /// `||`
    pub const LOGICAL_OR: Precedence = Precedence(3);
    /// `&&`
    pub const LOGICAL_AND: Precedence = Precedence(4);
    /// `|`
    pub const BITWISE_OR: Precedence = Precedence(5);
    /// `^`
    pub const BITWISE_XOR: Precedence = Precedence(6);
    /// `&`
    pub const BITWISE_AND: Precedence = Precedence(7);
    /// `==`, `!=`, `===`, `!==`.
    pub const EQUALITY: Precedence = Precedence(8);
    /// `<`, `>`, `<=`, `>=`, `in`, `instanceof`.
    pub const RELATIONAL: Precedence = Precedence(9);
    /// `<<`, `>>`, `>>>`.
    pub const BITWISE_SHIFT: Precedence = Precedence(10);
    /// `+`, `-`.
    pub const ADDITIVE: Precedence = Precedence(11);
    /// `*`, `/`, `%`.
    pub const MULTIPLICATIVE: Precedence = Precedence(12);
    /// Prefix unary operators, `delete`, `void`, `typeof`.
    pub const UNARY: Precedence = Precedence(13);
    /// Postfix `++` / `--`.
    pub const POSTFIX: Precedence = Precedence(14);
    /// Call expressions: `f()`.
    pub const CALL: Precedence = Precedence(15);
    /// `new` expressions.
    pub const NEW: Precedence = Precedence(16);
    /// Tagged template literals: `` tag`...` ``.
    pub const TAGGED_TEMPLATE: Precedence = Precedence(17);
    /// Member access: `a.b`, `a[b]`.
    pub const MEMBER: Precedence = Precedence(18);
    /// Literals, identifiers, and every fully self-delimiting form.
    pub const PRIMARY: Precedence = Precedence(19);

    /// Rank one step tighter.
    ///
    /// Left-associative binary operators print their right operand one rank
    /// above their own so that `a - (b - c)` keeps its parentheses.
    #[must_use]
    pub fn next(self) -> Precedence {
        Precedence(self.0.saturating_add(1))
    }
}
