//! Statement emit methods.
//!
//! Statements concatenate their child fragments with `join` so keyword
//! boundaries stay unambiguous, lay bodies out through the adoption
//! prefix/suffix helpers, and end in `semicolon(ctx)` so the trailing `;`
//! drops exactly where automatic semicolon insertion covers it.

use esgen_ast::{
    CatchClause, ClassBody, ExportSpecifier, Expression, ForInit, Function, Ident,
    ImportSpecifier, Literal, LiteralValue, Node, Precedence, Statement, SwitchCase,
    TryStatement, VariableDeclaration, VariableDeclarator,
};

use super::helpers::{is_line_terminator, is_white_space};
use super::{ExprContext, Generator, StmtContext};
use crate::error::Result;

/// True when an expression fragment would be misparsed at the start of a
/// statement: `{` opens a block, and `class`/`function` start declarations.
fn starts_statement_keyword(js: &str) -> bool {
    if js.starts_with('{') {
        return true;
    }
    if let Some(rest) = js.strip_prefix("class") {
        return matches!(rest.chars().next(),
            Some(ch) if ch == '{' || is_white_space(ch) || is_line_terminator(ch));
    }
    if let Some(rest) = js.strip_prefix("function") {
        return matches!(rest.chars().next(),
            Some(ch) if ch == '(' || ch == '*' || is_white_space(ch) || is_line_terminator(ch));
    }
    false
}

impl Generator {
    // =========================================================================
    // Top-level containers
    // =========================================================================

    pub(super) fn emit_program(&mut self, body: &[Statement]) -> Result<String> {
        let mut js = String::new();
        // A leading newline plus a forced final semicolon keep the output
        // safe to concatenate with other generated chunks.
        if self.opts.safe_concatenation && !body.is_empty() {
            js.push('\n');
        }
        let last = body.len().saturating_sub(1);
        for (i, item) in body.iter().enumerate() {
            let item_ctx = StmtContext {
                semicolon_optional: !self.opts.safe_concatenation && i == last,
                directive_context: true,
                ..StmtContext::default()
            };
            js.push_str(&self.indent);
            js.push_str(&self.statement(item, item_ctx)?);
            if i != last {
                js.push_str(&self.opts.newline);
            }
        }
        Ok(js)
    }

    pub(super) fn emit_block_statement(
        &mut self,
        body: &[Statement],
        ctx: StmtContext,
    ) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = String::from("{");
        js.push_str(&self.opts.newline);

        let last = body.len().saturating_sub(1);
        for (i, item) in body.iter().enumerate() {
            let item_ctx = StmtContext {
                directive_context: ctx.function_body,
                semicolon_optional: i == last,
                ..StmtContext::default()
            };
            js.push_str(&self.indent);
            js.push_str(&self.statement(item, item_ctx)?);
            js.push_str(&self.opts.newline);
        }

        self.restore_indent(previous);
        js.push_str(&self.indent);
        js.push('}');
        Ok(js)
    }

    // =========================================================================
    // Simple statements
    // =========================================================================

    pub(super) fn emit_expression_statement(
        &mut self,
        expression: &Expression,
        ctx: StmtContext,
    ) -> Result<String> {
        let js = self.expression(expression, Precedence::SEQUENCE, ExprContext::all())?;
        // In directive mode a plain string statement in directive position
        // must not reparse as a directive prologue.
        let parenthesize = starts_statement_keyword(&js)
            || (self.opts.directive
                && ctx.directive_context
                && matches!(expression,
                    Expression::Literal(literal)
                        if matches!(literal.value, LiteralValue::String(_))));

        if parenthesize {
            Ok(format!("({js}){}", self.semicolon(ctx)))
        } else {
            Ok(format!("{js}{}", self.semicolon(ctx)))
        }
    }

    pub(super) fn emit_directive_statement(
        &self,
        directive: &str,
        raw: Option<&str>,
        ctx: StmtContext,
    ) -> String {
        let text = match raw {
            Some(raw) if self.opts.raw => raw.to_string(),
            _ => self.escape_directive(directive),
        };
        format!("{text}{}", self.semicolon(ctx))
    }

    pub(super) fn emit_jump_statement(
        &self,
        keyword: &str,
        label: Option<&Ident>,
        ctx: StmtContext,
    ) -> String {
        match label {
            Some(label) => format!("{keyword} {}{}", label.name, self.semicolon(ctx)),
            None => format!("{keyword}{}", self.semicolon(ctx)),
        }
    }

    pub(super) fn emit_return_statement(
        &mut self,
        argument: Option<&Expression>,
        ctx: StmtContext,
    ) -> Result<String> {
        match argument {
            Some(argument) => {
                let arg = self.expression(argument, Precedence::SEQUENCE, ExprContext::all())?;
                Ok(format!("{}{}", self.join("return", &arg), self.semicolon(ctx)))
            }
            None => Ok(format!("return{}", self.semicolon(ctx))),
        }
    }

    pub(super) fn emit_throw_statement(
        &mut self,
        argument: &Expression,
        ctx: StmtContext,
    ) -> Result<String> {
        let arg = self.expression(argument, Precedence::SEQUENCE, ExprContext::all())?;
        Ok(format!("{}{}", self.join("throw", &arg), self.semicolon(ctx)))
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    pub(super) fn emit_if_statement(
        &mut self,
        test: &Expression,
        consequent: &Statement,
        alternate: Option<&Statement>,
        ctx: StmtContext,
    ) -> Result<String> {
        let semicolon_optional = self.semicolon(ctx).is_empty();

        let previous = self.shift_indent();
        let mut js = format!("if{}(", self.opts.opt_space);
        js.push_str(&self.expression(test, Precedence::SEQUENCE, ExprContext::all())?);
        js.push(')');
        self.restore_indent(previous);

        js.push_str(&self.adoption_prefix(consequent));
        match alternate {
            Some(alternate) => {
                let mut consequent_js = self.statement(consequent, StmtContext::default())?;
                consequent_js.push_str(&self.adoption_suffix(consequent));

                let alternate_ctx =
                    StmtContext { semicolon_optional, ..StmtContext::default() };
                let alternate_js = self.statement(alternate, alternate_ctx)?;
                let alternate_js = if matches!(alternate, Statement::IfStatement { .. }) {
                    format!("else {alternate_js}")
                } else {
                    let adopted = format!("{}{alternate_js}", self.adoption_prefix(alternate));
                    self.join("else", &adopted)
                };
                js.push_str(&self.join(&consequent_js, &alternate_js));
            }
            None => {
                let consequent_ctx =
                    StmtContext { semicolon_optional, ..StmtContext::default() };
                js.push_str(&self.statement(consequent, consequent_ctx)?);
            }
        }
        Ok(js)
    }

    pub(super) fn emit_while_statement(
        &mut self,
        test: &Expression,
        body: &Statement,
        ctx: StmtContext,
    ) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = format!("while{}(", self.opts.opt_space);
        js.push_str(&self.expression(test, Precedence::SEQUENCE, ExprContext::all())?);
        js.push(')');
        self.restore_indent(previous);

        js.push_str(&self.adoption_prefix(body));
        let body_ctx = StmtContext {
            semicolon_optional: self.semicolon(ctx).is_empty(),
            ..StmtContext::default()
        };
        js.push_str(&self.statement(body, body_ctx)?);
        Ok(js)
    }

    pub(super) fn emit_do_while_statement(
        &mut self,
        body: &Statement,
        test: &Expression,
        ctx: StmtContext,
    ) -> Result<String> {
        // The body fragment carries its own layout so `do{}while` stays
        // joined even when the body is a single statement.
        let mut body_js = self.adoption_prefix(body);
        body_js.push_str(&self.statement(body, StmtContext::default())?);
        body_js.push_str(&self.adoption_suffix(body));

        let mut js = self.join("do", &body_js);
        js = self.join(&js, &format!("while{}(", self.opts.opt_space));
        js.push_str(&self.expression(test, Precedence::SEQUENCE, ExprContext::all())?);
        js.push(')');
        js.push_str(self.semicolon(ctx));
        Ok(js)
    }

    pub(super) fn emit_for_statement(
        &mut self,
        init: Option<&ForInit>,
        test: Option<&Expression>,
        update: Option<&Expression>,
        body: &Statement,
        ctx: StmtContext,
    ) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = format!("for{}(", self.opts.opt_space);

        match init {
            // The declaration renders its own `;`, with `in` blocked so a
            // bare `in` initializer cannot reparse as a `for-in` head.
            Some(ForInit::Declaration(declaration)) => {
                let init_ctx = StmtContext { allow_in: false, ..StmtContext::default() };
                js.push_str(&self.emit_variable_declaration(declaration, init_ctx)?);
            }
            Some(ForInit::Expression(expression)) => {
                js.push_str(&self.expression(
                    expression,
                    Precedence::SEQUENCE,
                    ExprContext::threading_in(false),
                )?);
                js.push(';');
            }
            None => js.push(';'),
        }

        if let Some(test) = test {
            js.push_str(&self.opts.opt_space);
            js.push_str(&self.expression(test, Precedence::SEQUENCE, ExprContext::all())?);
        }
        js.push(';');
        if let Some(update) = update {
            js.push_str(&self.opts.opt_space);
            js.push_str(&self.expression(update, Precedence::SEQUENCE, ExprContext::all())?);
        }
        js.push(')');
        self.restore_indent(previous);

        js.push_str(&self.adoption_prefix(body));
        let body_ctx = StmtContext {
            semicolon_optional: self.semicolon(ctx).is_empty(),
            ..StmtContext::default()
        };
        js.push_str(&self.statement(body, body_ctx)?);
        Ok(js)
    }

    pub(super) fn emit_for_iterator_statement(
        &mut self,
        operator: &str,
        left: &ForInit,
        right: &Expression,
        body: &Statement,
        ctx: StmtContext,
    ) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = format!("for{}(", self.opts.opt_space);

        match left {
            ForInit::Declaration(declaration) => {
                let inner = self.shift_indent();
                js.push_str(declaration.kind.as_str());
                js.push_str(&self.opts.space);
                if let Some(declarator) = declaration.declarations.first() {
                    js.push_str(&self.emit_variable_declarator(declarator, false)?);
                }
                self.restore_indent(inner);
            }
            ForInit::Expression(expression) => {
                js.push_str(&self.expression(expression, Precedence::CALL, ExprContext::all())?);
            }
        }

        js = self.join(&js, operator);
        let right_js = self.expression(right, Precedence::SEQUENCE, ExprContext::all())?;
        js = self.join(&js, &right_js);
        js.push(')');
        self.restore_indent(previous);

        js.push_str(&self.adoption_prefix(body));
        let body_ctx = StmtContext {
            semicolon_optional: self.semicolon(ctx).is_empty(),
            ..StmtContext::default()
        };
        js.push_str(&self.statement(body, body_ctx)?);
        Ok(js)
    }

    pub(super) fn emit_switch_statement(
        &mut self,
        discriminant: &Expression,
        cases: &[SwitchCase],
    ) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = format!("switch{}(", self.opts.opt_space);
        js.push_str(&self.expression(discriminant, Precedence::SEQUENCE, ExprContext::all())?);
        js.push(')');
        js.push_str(&self.opts.opt_space);
        js.push('{');
        js.push_str(&self.opts.newline);
        // Cases print at the `switch` level; each case indents its own
        // consequent.
        self.restore_indent(previous);

        let last = cases.len().saturating_sub(1);
        for (i, case) in cases.iter().enumerate() {
            let case_ctx = StmtContext {
                semicolon_optional: i == last,
                ..StmtContext::default()
            };
            js.push_str(&self.indent);
            js.push_str(&self.emit_switch_case(case, case_ctx)?);
            js.push_str(&self.opts.newline);
        }

        js.push_str(&self.indent);
        js.push('}');
        Ok(js)
    }

    fn emit_switch_case(&mut self, case: &SwitchCase, ctx: StmtContext) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = match &case.test {
            Some(test) => {
                let test_js = self.expression(test, Precedence::SEQUENCE, ExprContext::all())?;
                let mut head = self.join("case", &test_js);
                head.push(':');
                head
            }
            None => String::from("default:"),
        };

        let last = case.consequent.len().saturating_sub(1);
        let mut start = 0;
        if let Some(first @ Statement::BlockStatement { .. }) = case.consequent.first() {
            js.push_str(&self.adoption_prefix(first));
            js.push_str(&self.statement(first, StmtContext::default())?);
            start = 1;
        }
        for (i, consequent) in case.consequent.iter().enumerate().skip(start) {
            let item_ctx = StmtContext {
                semicolon_optional: i == last && self.semicolon(ctx).is_empty(),
                ..StmtContext::default()
            };
            js.push_str(&self.opts.newline);
            js.push_str(&self.indent);
            js.push_str(&self.statement(consequent, item_ctx)?);
        }

        self.restore_indent(previous);
        Ok(js)
    }

    pub(super) fn emit_try_statement(&mut self, try_stmt: &TryStatement) -> Result<String> {
        let mut js = String::from("try");
        js.push_str(&self.adoption_prefix(&try_stmt.block));
        js.push_str(&self.statement(&try_stmt.block, StmtContext::default())?);
        js.push_str(&self.adoption_suffix(&try_stmt.block));

        let last = try_stmt.handlers.len().saturating_sub(1);
        for (i, handler) in try_stmt.handlers.iter().enumerate() {
            let clause = self.emit_catch_clause(handler)?;
            js = self.join(&js, &clause);
            if try_stmt.finalizer.is_some() || i != last {
                js.push_str(&self.adoption_suffix(&handler.body));
            }
        }

        if let Some(finalizer) = &try_stmt.finalizer {
            let keyword = format!("finally{}", self.adoption_prefix(finalizer));
            js = self.join(&js, &keyword);
            js.push_str(&self.statement(finalizer, StmtContext::default())?);
        }
        Ok(js)
    }

    fn emit_catch_clause(&mut self, clause: &CatchClause) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = format!("catch{}(", self.opts.opt_space);
        js.push_str(&self.expression(&clause.param, Precedence::SEQUENCE, ExprContext::all())?);
        if let Some(guard) = &clause.guard {
            js.push_str(" if ");
            js.push_str(&self.expression(guard, Precedence::SEQUENCE, ExprContext::all())?);
        }
        self.restore_indent(previous);

        js.push(')');
        js.push_str(&self.adoption_prefix(&clause.body));
        js.push_str(&self.statement(&clause.body, StmtContext::default())?);
        Ok(js)
    }

    pub(super) fn emit_labeled_statement(
        &mut self,
        label: &Ident,
        body: &Statement,
        ctx: StmtContext,
    ) -> Result<String> {
        let mut previous = self.indent.clone();
        let mut js = format!("{}:{}", label.name, self.adoption_prefix(body));
        if !matches!(body, Statement::BlockStatement { .. }) {
            previous = self.shift_indent();
        }

        let body_ctx = StmtContext {
            semicolon_optional: self.semicolon(ctx).is_empty(),
            ..StmtContext::default()
        };
        js.push_str(&self.statement(body, body_ctx)?);
        self.restore_indent(previous);
        Ok(js)
    }

    pub(super) fn emit_with_statement(
        &mut self,
        object: &Expression,
        body: &Statement,
        ctx: StmtContext,
    ) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = format!("with{}(", self.opts.opt_space);
        js.push_str(&self.expression(object, Precedence::SEQUENCE, ExprContext::all())?);
        js.push(')');
        self.restore_indent(previous);

        js.push_str(&self.adoption_prefix(body));
        let body_ctx = StmtContext {
            semicolon_optional: self.semicolon(ctx).is_empty(),
            ..StmtContext::default()
        };
        js.push_str(&self.statement(body, body_ctx)?);
        Ok(js)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub(super) fn emit_variable_declaration(
        &mut self,
        declaration: &VariableDeclaration,
        ctx: StmtContext,
    ) -> Result<String> {
        let mut js = declaration.kind.as_str().to_string();
        let previous = if declaration.declarations.len() > 1 {
            Some(self.shift_indent())
        } else {
            None
        };

        for (i, declarator) in declaration.declarations.iter().enumerate() {
            if i == 0 {
                js.push_str(&self.opts.space);
            } else {
                js.push(',');
                js.push_str(&self.opts.opt_space);
            }
            js.push_str(&self.emit_variable_declarator(declarator, ctx.allow_in)?);
        }
        js.push_str(self.semicolon(ctx));

        if let Some(previous) = previous {
            self.restore_indent(previous);
        }
        Ok(js)
    }

    pub(super) fn emit_variable_declarator(
        &mut self,
        declarator: &VariableDeclarator,
        allow_in: bool,
    ) -> Result<String> {
        let operand_ctx = ExprContext::threading_in(allow_in);
        match &declarator.init {
            Some(init) => {
                let mut js =
                    self.expression(&declarator.id, Precedence::ASSIGNMENT, operand_ctx)?;
                js.push_str(&self.opts.opt_space);
                js.push('=');
                js.push_str(&self.opts.opt_space);
                js.push_str(&self.expression(init, Precedence::ASSIGNMENT, operand_ctx)?);
                Ok(js)
            }
            None => self.emit_binding_target(&declarator.id, Precedence::ASSIGNMENT, allow_in),
        }
    }

    pub(super) fn emit_function_declaration(&mut self, function: &Function) -> Result<String> {
        let mut js = if function.generator {
            format!("function*{}", self.opts.opt_space)
        } else {
            format!("function{}", self.opts.space)
        };
        if let Some(id) = &function.id {
            js.push_str(&id.name);
        }
        js.push_str(&self.emit_function_content(function, false)?);
        Ok(js)
    }

    pub(super) fn emit_class_declaration(
        &mut self,
        id: &Ident,
        super_class: Option<&Expression>,
        body: &ClassBody,
    ) -> Result<String> {
        let mut js = format!("class {}", id.name);
        if let Some(super_class) = super_class {
            let fragment =
                self.expression(super_class, Precedence::ASSIGNMENT, ExprContext::all())?;
            js.push_str(&self.opts.space);
            js.push_str(&self.join("extends", &fragment));
        }
        js.push_str(&self.opts.opt_space);
        js.push_str(&self.emit_class_body(body)?);
        Ok(js)
    }

    pub(super) fn emit_class_body(&mut self, body: &ClassBody) -> Result<String> {
        let previous = self.shift_indent();
        let mut js = String::from("{");
        js.push_str(&self.opts.newline);

        let last = body.body.len().saturating_sub(1);
        for (i, method) in body.body.iter().enumerate() {
            js.push_str(&self.indent);
            js.push_str(&self.emit_method_definition(method)?);
            if i != last {
                js.push_str(&self.opts.newline);
            }
        }

        self.restore_indent(previous);
        js.push_str(&self.opts.newline);
        js.push_str(&self.indent);
        js.push('}');
        Ok(js)
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn specifier_text(&self, id: &Ident, name: Option<&Ident>) -> String {
        match name {
            Some(name) => {
                let space = &self.opts.space;
                format!("{}{space}as{space}{}", id.name, name.name)
            }
            None => id.name.clone(),
        }
    }

    fn export_specifier_text(&self, specifier: &ExportSpecifier) -> String {
        match specifier {
            ExportSpecifier::Named { id, name } => self.specifier_text(id, name.as_ref()),
            ExportSpecifier::Batch => String::from("*"),
        }
    }

    pub(super) fn emit_import_declaration(
        &mut self,
        specifiers: &[ImportSpecifier],
        source: &Literal,
        ctx: StmtContext,
    ) -> Result<String> {
        let mut js = String::from("import");

        // No import clause means a bare `import "module"` without `from`.
        if !specifiers.is_empty() {
            let has_binding = specifiers[0].default;
            let first_named = usize::from(has_binding);
            let last = specifiers.len() - 1;

            if has_binding {
                js = self.join(&js, &specifiers[0].id.name);
            }

            if first_named < specifiers.len() {
                if has_binding {
                    js.push(',');
                }
                js.push_str(&self.opts.opt_space);
                js.push('{');

                if first_named == last {
                    let specifier = &specifiers[first_named];
                    js.push_str(&self.opts.opt_space);
                    js.push_str(&self.specifier_text(&specifier.id, specifier.name.as_ref()));
                    js.push_str(&self.opts.opt_space);
                } else {
                    let previous = self.shift_indent();
                    for (i, specifier) in specifiers.iter().enumerate().skip(first_named) {
                        js.push_str(&self.opts.newline);
                        js.push_str(&self.indent);
                        js.push_str(&self.specifier_text(&specifier.id, specifier.name.as_ref()));
                        if i != last {
                            js.push(',');
                        }
                    }
                    self.restore_indent(previous);
                    js.push_str(&self.opts.newline);
                    js.push_str(&self.indent);
                }

                js.push('}');
                js.push_str(&self.opts.opt_space);
            }

            js = self.join(&js, "from");
        }

        js.push_str(&self.opts.opt_space);
        js.push_str(&self.emit_literal(source)?);
        js.push_str(self.semicolon(ctx));
        Ok(js)
    }

    pub(super) fn emit_export_declaration(
        &mut self,
        default: bool,
        declaration: Option<&Node>,
        specifiers: Option<&[ExportSpecifier]>,
        source: Option<&Literal>,
        ctx: StmtContext,
    ) -> Result<String> {
        // export default AssignmentExpression ;
        if default && let Some(declaration) = declaration {
            let declaration_js = match declaration {
                Node::Expression(expression) => {
                    self.expression(expression, Precedence::ASSIGNMENT, ExprContext::all())?
                }
                Node::Statement(statement) => self.statement(statement, StmtContext::default())?,
            };
            let mut js = self.join("export default", &declaration_js);
            js.push_str(self.semicolon(ctx));
            return Ok(js);
        }

        // export * FromClause ; / export ExportClause [FromClause] ;
        if let Some(specifiers) = specifiers {
            let mut js = String::from("export");

            if specifiers.is_empty() {
                js.push_str(&self.opts.opt_space);
                js.push('{');
                js.push_str(&self.opts.opt_space);
                js.push('}');
            } else if matches!(specifiers[0], ExportSpecifier::Batch) {
                js = self.join(&js, "*");
            } else {
                let previous = self.shift_indent();
                let last = specifiers.len() - 1;
                js.push_str(&self.opts.opt_space);
                js.push('{');
                for (i, specifier) in specifiers.iter().enumerate() {
                    js.push_str(&self.opts.newline);
                    js.push_str(&self.indent);
                    js.push_str(&self.export_specifier_text(specifier));
                    if i != last {
                        js.push(',');
                    }
                }
                self.restore_indent(previous);
                js.push_str(&self.opts.newline);
                js.push_str(&self.indent);
                js.push('}');
            }

            if let Some(source) = source {
                let source_js = self.emit_literal(source)?;
                let from = format!("from{}{source_js}", self.opts.opt_space);
                js = self.join(&js, &from);
            }
            js.push_str(self.semicolon(ctx));
            return Ok(js);
        }

        // export VariableStatement / export Declaration
        if let Some(declaration) = declaration {
            let declaration_js = match declaration {
                Node::Statement(statement) => {
                    let declaration_ctx = StmtContext {
                        semicolon_optional: self.semicolon(ctx).is_empty(),
                        ..StmtContext::default()
                    };
                    self.statement(statement, declaration_ctx)?
                }
                Node::Expression(expression) => {
                    self.expression(expression, Precedence::SEQUENCE, ExprContext::all())?
                }
            };
            return Ok(self.join("export", &declaration_js));
        }

        Ok(String::new())
    }

    pub(super) fn emit_module_declaration(
        &mut self,
        id: &Ident,
        source: &Literal,
        ctx: StmtContext,
    ) -> Result<String> {
        let source_js = self.emit_literal(source)?;
        let space = &self.opts.space;
        Ok(format!(
            "module{space}{}{space}from{}{source_js}{}",
            id.name,
            self.opts.opt_space,
            self.semicolon(ctx)
        ))
    }
}
