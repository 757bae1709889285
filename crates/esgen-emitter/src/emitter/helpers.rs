//! Fragment-joining and layout helpers.
//!
//! Generated fragments are composed bottom-up; these helpers inspect the
//! edge characters of adjacent fragments to decide whether a separator is
//! required (so `a` and `in` never glue into `ain`, and `+` never meets
//! `+`), and manage the indentation save/restore discipline.

use esgen_ast::{Expression, Precedence, Statement};

use super::{ExprContext, Generator, StmtContext};
use crate::error::Result;

// =============================================================================
// Character classification
// =============================================================================

/// ECMAScript IdentifierPart, close enough for edge inspection: ASCII
/// identifier characters, the escape backslash, and non-ASCII letters and
/// digits.
pub(super) fn is_identifier_part(ch: char) -> bool {
    ch == '$' || ch == '_' || ch == '\\' || ch.is_ascii_alphanumeric()
        || (!ch.is_ascii() && ch.is_alphanumeric())
}

pub(super) fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// ECMAScript WhiteSpace, line terminators excluded.
pub(super) fn is_white_space(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{B}'
            | '\u{C}'
            | '\u{A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

// =============================================================================
// Parenthesization
// =============================================================================

/// Wrap `text` when its own rank binds looser than the slot demands.
pub(super) fn parenthesize(text: String, current: Precedence, required: Precedence) -> String {
    if current < required {
        format!("({text})")
    } else {
        text
    }
}

impl Generator {
    // =========================================================================
    // Fragment joining
    // =========================================================================

    /// Concatenate two fragments with exactly the separator the boundary
    /// needs: the hard space when the edges would otherwise form one token
    /// (`+ +`, `- -`, identifier parts, `/` before an `i`-keyword), nothing
    /// when either edge is already whitespace, the optional space otherwise.
    pub(super) fn join(&self, left: &str, right: &str) -> String {
        let Some(left_last) = left.chars().last() else {
            return right.to_string();
        };
        let Some(right_first) = right.chars().next() else {
            return left.to_string();
        };

        if ((left_last == '+' || left_last == '-') && left_last == right_first)
            || (is_identifier_part(left_last) && is_identifier_part(right_first))
            || (left_last == '/' && right_first == 'i')
        {
            format!("{left}{}{right}", self.opts.space)
        } else if is_white_space(left_last)
            || is_line_terminator(left_last)
            || is_white_space(right_first)
            || is_line_terminator(right_first)
        {
            format!("{left}{right}")
        } else {
            format!("{left}{}{right}", self.opts.opt_space)
        }
    }

    // =========================================================================
    // Statement layout
    // =========================================================================

    /// Separator placed between a statement head and an adopted body:
    /// blocks hang on the same line, empty bodies collapse onto the head,
    /// anything else moves to its own line one level deeper.
    pub(super) fn adoption_prefix(&self, stmt: &Statement) -> String {
        match stmt {
            Statement::BlockStatement { .. } => self.opts.opt_space.clone(),
            Statement::EmptyStatement => String::new(),
            _ => format!("{}{}{}", self.opts.newline, self.indent, self.opts.indent_unit),
        }
    }

    /// Separator placed after an adopted body, before a trailing keyword
    /// (`else`, `while`, `finally`).
    pub(super) fn adoption_suffix(&self, stmt: &Statement) -> String {
        match stmt {
            Statement::BlockStatement { .. } => self.opts.opt_space.clone(),
            _ => format!("{}{}", self.opts.newline, self.indent),
        }
    }

    /// Push one indentation level, returning the previous prefix for the
    /// caller to restore. Restoration is the caller's job so sibling slots
    /// never observe a leaked level.
    pub(super) fn shift_indent(&mut self) -> String {
        let previous = self.indent.clone();
        self.indent.push_str(&self.opts.indent_unit);
        previous
    }

    pub(super) fn restore_indent(&mut self, previous: String) {
        self.indent = previous;
    }

    /// The trailing semicolon for a statement slot: dropped only when the
    /// format says semicolons are optional and the slot is covered by
    /// automatic insertion.
    pub(super) fn semicolon(&self, ctx: StmtContext) -> &'static str {
        if !self.opts.semicolons && ctx.semicolon_optional {
            ""
        } else {
            ";"
        }
    }

    // =========================================================================
    // Shared list forms
    // =========================================================================

    /// `(a, b, c)` at assignment precedence, shared by calls and `new`.
    pub(super) fn emit_argument_list(&mut self, arguments: &[Expression]) -> Result<String> {
        let mut result = String::from("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                result.push(',');
                result.push_str(&self.opts.opt_space);
            }
            result.push_str(&self.expression(
                argument,
                Precedence::ASSIGNMENT,
                ExprContext::all(),
            )?);
        }
        result.push(')');
        Ok(result)
    }

    /// A binding position: identifiers print bare, destructuring patterns
    /// render as expressions.
    pub(super) fn emit_binding_target(
        &mut self,
        target: &Expression,
        precedence: Precedence,
        allow_in: bool,
    ) -> Result<String> {
        if let Expression::Identifier { name } = target {
            return Ok(name.clone());
        }
        self.expression(target, precedence, ExprContext::threading_in(allow_in))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Generator;
    use super::*;
    use crate::options::{Options, ResolvedOptions};

    fn generator() -> Generator {
        Generator::new(ResolvedOptions::resolve(&Options::default()))
    }

    fn compact_generator() -> Generator {
        Generator::new(ResolvedOptions::resolve(&Options::minify()))
    }

    #[test]
    fn join_inserts_hard_space_for_sign_runs() {
        let g = compact_generator();
        assert_eq!(g.join("a -", "-b"), "a - -b");
        assert_eq!(g.join("+", "+x"), "+ +x");
    }

    #[test]
    fn join_separates_identifier_parts_even_when_compact() {
        let g = compact_generator();
        assert_eq!(g.join("typeof", "x"), "typeof x");
        assert_eq!(g.join("a", "instanceof b"), "a instanceof b");
    }

    #[test]
    fn join_guards_slash_before_i_keywords() {
        let g = compact_generator();
        assert_eq!(g.join("a/", "in b"), "a/ in b");
    }

    #[test]
    fn join_skips_separator_around_existing_whitespace() {
        let g = generator();
        assert_eq!(g.join("a ", "b"), "a b");
        assert_eq!(g.join("a", " b"), "a b");
    }

    #[test]
    fn join_uses_optional_space_otherwise() {
        assert_eq!(generator().join("a)", "{"), "a) {");
        assert_eq!(compact_generator().join("a)", "{"), "a){");
    }

    #[test]
    fn join_passes_empty_sides_through() {
        let g = generator();
        assert_eq!(g.join("", "x"), "x");
        assert_eq!(g.join("x", ""), "x");
    }

    #[test]
    fn parenthesize_wraps_only_looser_ranks() {
        assert_eq!(
            parenthesize("a, b".to_string(), Precedence::SEQUENCE, Precedence::ASSIGNMENT),
            "(a, b)"
        );
        assert_eq!(
            parenthesize("a + b".to_string(), Precedence::ADDITIVE, Precedence::ADDITIVE),
            "a + b"
        );
    }

    #[test]
    fn shift_indent_restores_exactly() {
        let mut g = generator();
        let previous = g.shift_indent();
        assert_eq!(g.indent, "    ");
        g.restore_indent(previous);
        assert_eq!(g.indent, "");
    }

    #[test]
    fn identifier_part_classification() {
        assert!(is_identifier_part('a'));
        assert!(is_identifier_part('0'));
        assert!(is_identifier_part('$'));
        assert!(is_identifier_part('_'));
        assert!(is_identifier_part('é'));
        assert!(!is_identifier_part('('));
        assert!(!is_identifier_part(' '));
    }
}
