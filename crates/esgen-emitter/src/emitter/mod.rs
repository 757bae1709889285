//! The render engine: one [`Generator`] per `generate` call.
//!
//! Submodules hold the per-node-kind emit methods (`expressions`,
//! `statements`), the literal serializers (`literals`), and the
//! fragment-joining and indentation helpers (`helpers`). This module owns
//! the render state, the recursion guard, and the exhaustive dispatch from
//! node kind to emit method.

mod expressions;
mod helpers;
mod literals;
mod statements;

use bitflags::bitflags;

use esgen_ast::{Expression, Precedence, Statement};

use crate::error::{CodegenError, Result};
use crate::options::ResolvedOptions;

/// Maximum nesting depth the generator will follow.
///
/// Each expression or statement entry adds a native stack frame; the
/// counter fails fast with [`CodegenError::NestingTooDeep`] before the
/// stack can overflow on hostile or machine-generated trees. 1000 levels
/// is far beyond what parsers produce for human-written sources.
pub const MAX_CODEGEN_DEPTH: u32 = 1_000;

bitflags! {
    /// Permissions threaded into expression slots.
    ///
    /// `ALLOW_IN` guards the bare `in` operator inside `for`-heads;
    /// `ALLOW_CALL` is cleared on the callee side of `new` so a call there
    /// gets wrapped; `ALLOW_UNPARENTHESIZED_NEW` is cleared where a nested
    /// zero-argument `new` must still print its parentheses.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct ExprContext: u8 {
        const ALLOW_IN = 1 << 0;
        const ALLOW_CALL = 1 << 1;
        const ALLOW_UNPARENTHESIZED_NEW = 1 << 2;
    }
}

impl Default for ExprContext {
    fn default() -> Self {
        Self::all()
    }
}

impl ExprContext {
    pub(crate) fn allow_in(self) -> bool {
        self.contains(Self::ALLOW_IN)
    }

    pub(crate) fn allow_call(self) -> bool {
        self.contains(Self::ALLOW_CALL)
    }

    pub(crate) fn allow_unparenthesized_new(self) -> bool {
        self.contains(Self::ALLOW_UNPARENTHESIZED_NEW)
    }

    /// The everything-permitted context with `ALLOW_IN` set per `allow_in`.
    pub(crate) fn threading_in(allow_in: bool) -> Self {
        let mut ctx = Self::all();
        ctx.set(Self::ALLOW_IN, allow_in);
        ctx
    }
}

/// Flags threaded into statement slots.
///
/// `semicolon_optional` marks slots where automatic semicolon insertion
/// covers a dropped `;` (last statement of a block or program);
/// `function_body` and `directive_context` mark directive-prologue
/// positions; `allow_in` is cleared inside `for`-head declarations.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StmtContext {
    pub allow_in: bool,
    pub semicolon_optional: bool,
    pub function_body: bool,
    pub directive_context: bool,
}

impl Default for StmtContext {
    fn default() -> Self {
        Self {
            allow_in: true,
            semicolon_optional: false,
            function_body: false,
            directive_context: false,
        }
    }
}

/// Render state for one generation call.
///
/// Holds the resolved options, the current indentation prefix, and the
/// recursion depth. Never shared: every `generate` call builds its own,
/// which is what makes concurrent generation safe without locking.
pub(crate) struct Generator {
    opts: ResolvedOptions,
    indent: String,
    depth: u32,
}

impl Generator {
    pub(crate) fn new(opts: ResolvedOptions) -> Self {
        let indent = opts.base_indent.clone();
        Self { opts, indent, depth: 0 }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_CODEGEN_DEPTH {
            return Err(CodegenError::NestingTooDeep { limit: MAX_CODEGEN_DEPTH });
        }
        self.depth += 1;
        Ok(())
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub(crate) fn expression(
        &mut self,
        expr: &Expression,
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        self.enter()?;
        let result = self.expression_inner(expr, precedence, ctx);
        self.depth -= 1;
        result
    }

    fn expression_inner(
        &mut self,
        expr: &Expression,
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        match expr {
            Expression::This => Ok("this".to_string()),
            Expression::Identifier { name } => Ok(name.clone()),
            Expression::Literal(literal) => self.emit_literal(literal),
            Expression::SequenceExpression { expressions } => {
                self.emit_sequence_expression(expressions, precedence, ctx)
            }
            Expression::AssignmentExpression { operator, left, right } => {
                self.emit_assignment_expression(*operator, left, right, precedence, ctx)
            }
            Expression::ConditionalExpression { test, consequent, alternate } => {
                self.emit_conditional_expression(test, consequent, alternate, precedence, ctx)
            }
            Expression::LogicalExpression { operator, left, right } => self.emit_binary_expression(
                operator.as_str(),
                operator.precedence(),
                false,
                left,
                right,
                precedence,
                ctx,
            ),
            Expression::BinaryExpression { operator, left, right } => self.emit_binary_expression(
                operator.as_str(),
                operator.precedence(),
                *operator == esgen_ast::BinaryOperator::In,
                left,
                right,
                precedence,
                ctx,
            ),
            Expression::UnaryExpression { operator, argument } => {
                self.emit_unary_expression(*operator, argument, precedence)
            }
            Expression::UpdateExpression { operator, argument, prefix } => {
                self.emit_update_expression(*operator, argument, *prefix, precedence)
            }
            Expression::YieldExpression { argument, delegate } => {
                self.emit_yield_expression(argument.as_deref(), *delegate, precedence)
            }
            Expression::CallExpression { callee, arguments } => {
                self.emit_call_expression(callee, arguments, precedence, ctx)
            }
            Expression::NewExpression { callee, arguments } => {
                self.emit_new_expression(callee, arguments, precedence, ctx)
            }
            Expression::MemberExpression { object, property, computed } => {
                self.emit_member_expression(object, property, *computed, precedence, ctx)
            }
            Expression::Function(function) => self.emit_function_expression(function),
            Expression::ArrowFunction(function) => {
                self.emit_arrow_function_expression(function, precedence)
            }
            Expression::ClassExpression { id, super_class, body } => {
                self.emit_class_expression(id.as_deref(), super_class.as_deref(), body)
            }
            Expression::ArrayExpression { elements } | Expression::ArrayPattern { elements } => {
                self.emit_array_like(elements)
            }
            Expression::ObjectExpression { properties } => self.emit_object_expression(properties),
            Expression::ObjectPattern { properties } => self.emit_object_pattern(properties),
            Expression::SpreadElement { argument } => self.emit_spread_element(argument),
            Expression::TemplateLiteral(template) => self.emit_template_literal(template),
            Expression::TaggedTemplateExpression { tag, quasi } => {
                self.emit_tagged_template_expression(tag, quasi, precedence, ctx)
            }
            Expression::ComprehensionExpression { body, blocks, filter } => {
                self.emit_comprehension(body, blocks, filter.as_deref(), false)
            }
            Expression::GeneratorExpression { body, blocks, filter } => {
                self.emit_comprehension(body, blocks, filter.as_deref(), true)
            }
            Expression::Verbatim { content, precedence: declared } => {
                Ok(self.emit_verbatim(content, declared.unwrap_or(Precedence::SEQUENCE), precedence))
            }
        }
    }

    pub(crate) fn statement(&mut self, stmt: &Statement, ctx: StmtContext) -> Result<String> {
        self.enter()?;
        let result = self.statement_inner(stmt, ctx);
        self.depth -= 1;
        result
    }

    fn statement_inner(&mut self, stmt: &Statement, ctx: StmtContext) -> Result<String> {
        match stmt {
            Statement::Program { body } => self.emit_program(body),
            Statement::BlockStatement { body } => self.emit_block_statement(body, ctx),
            Statement::ExpressionStatement { expression } => {
                self.emit_expression_statement(expression, ctx)
            }
            Statement::DirectiveStatement { directive, raw } => {
                Ok(self.emit_directive_statement(directive, raw.as_deref(), ctx))
            }
            Statement::EmptyStatement => Ok(";".to_string()),
            Statement::DebuggerStatement => Ok(format!("debugger{}", self.semicolon(ctx))),
            Statement::IfStatement { test, consequent, alternate } => {
                self.emit_if_statement(test, consequent, alternate.as_deref(), ctx)
            }
            Statement::WhileStatement { test, body } => self.emit_while_statement(test, body, ctx),
            Statement::DoWhileStatement { body, test } => {
                self.emit_do_while_statement(body, test, ctx)
            }
            Statement::ForStatement { init, test, update, body } => self.emit_for_statement(
                init.as_ref(),
                test.as_deref(),
                update.as_deref(),
                body,
                ctx,
            ),
            Statement::ForInStatement { left, right, body } => {
                self.emit_for_iterator_statement("in", left, right, body, ctx)
            }
            Statement::ForOfStatement { left, right, body } => {
                self.emit_for_iterator_statement("of", left, right, body, ctx)
            }
            Statement::SwitchStatement { discriminant, cases } => {
                self.emit_switch_statement(discriminant, cases)
            }
            Statement::BreakStatement { label } => Ok(self.emit_jump_statement("break", label.as_ref(), ctx)),
            Statement::ContinueStatement { label } => {
                Ok(self.emit_jump_statement("continue", label.as_ref(), ctx))
            }
            Statement::ReturnStatement { argument } => {
                self.emit_return_statement(argument.as_deref(), ctx)
            }
            Statement::ThrowStatement { argument } => self.emit_throw_statement(argument, ctx),
            Statement::Try(try_stmt) => self.emit_try_statement(try_stmt),
            Statement::LabeledStatement { label, body } => {
                self.emit_labeled_statement(label, body, ctx)
            }
            Statement::WithStatement { object, body } => self.emit_with_statement(object, body, ctx),
            Statement::VariableDeclaration(declaration) => {
                self.emit_variable_declaration(declaration, ctx)
            }
            Statement::FunctionDeclaration(function) => self.emit_function_declaration(function),
            Statement::ClassDeclaration { id, super_class, body } => {
                self.emit_class_declaration(id, super_class.as_deref(), body)
            }
            Statement::ImportDeclaration { specifiers, source } => {
                self.emit_import_declaration(specifiers, source, ctx)
            }
            Statement::ExportDeclaration { default, declaration, specifiers, source } => self
                .emit_export_declaration(
                    *default,
                    declaration.as_deref(),
                    specifiers.as_deref(),
                    source.as_ref(),
                    ctx,
                ),
            Statement::ModuleDeclaration { id, source } => {
                self.emit_module_declaration(id, source, ctx)
            }
        }
    }
}
