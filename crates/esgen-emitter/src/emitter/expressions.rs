//! Expression emit methods.
//!
//! Each method renders one expression kind into a fragment and wraps it in
//! parentheses when the surrounding slot binds tighter than the form itself.
//! Slot precedences and the `in`/call/`new` permissions mirror the
//! ECMAScript expression grammar; see `Precedence` for the rank table.

use esgen_ast::{
    AssignmentOperator, ClassBody, ComprehensionBlock, Expression, ForInit, Function,
    LiteralValue, MethodDefinition, Node, Precedence, Property, PropertyKind, TemplateLiteral,
    UnaryOperator, UpdateOperator,
};

use super::helpers::{is_identifier_part, parenthesize};
use super::{ExprContext, Generator, StmtContext};
use crate::error::Result;

impl Generator {
    // =========================================================================
    // Operator forms
    // =========================================================================

    pub(super) fn emit_sequence_expression(
        &mut self,
        expressions: &[Expression],
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        let parens = Precedence::SEQUENCE < precedence;
        // Parentheses re-permit `in`: the sequence no longer sits bare in a
        // `for`-head.
        let child_ctx = ExprContext::threading_in(ctx.allow_in() || parens);

        let mut js = String::new();
        for (i, expression) in expressions.iter().enumerate() {
            if i > 0 {
                js.push(',');
                js.push_str(&self.opts.opt_space);
            }
            js.push_str(&self.expression(expression, Precedence::ASSIGNMENT, child_ctx)?);
        }
        Ok(parenthesize(js, Precedence::SEQUENCE, precedence))
    }

    pub(super) fn emit_assignment_expression(
        &mut self,
        operator: AssignmentOperator,
        left: &Expression,
        right: &Expression,
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        let parens = Precedence::ASSIGNMENT < precedence;
        let operand_ctx = ExprContext::threading_in(ctx.allow_in() || parens);

        let mut js = self.expression(left, Precedence::CALL, operand_ctx)?;
        js.push_str(&self.opts.opt_space);
        js.push_str(operator.as_str());
        js.push_str(&self.opts.opt_space);
        js.push_str(&self.expression(right, Precedence::ASSIGNMENT, operand_ctx)?);
        Ok(parenthesize(js, Precedence::ASSIGNMENT, precedence))
    }

    pub(super) fn emit_conditional_expression(
        &mut self,
        test: &Expression,
        consequent: &Expression,
        alternate: &Expression,
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        let parens = Precedence::CONDITIONAL < precedence;
        let child_ctx = ExprContext::threading_in(ctx.allow_in() || parens);

        let mut js = self.expression(test, Precedence::LOGICAL_OR, child_ctx)?;
        js.push_str(&self.opts.opt_space);
        js.push('?');
        js.push_str(&self.opts.opt_space);
        js.push_str(&self.expression(consequent, Precedence::ASSIGNMENT, child_ctx)?);
        js.push_str(&self.opts.opt_space);
        js.push(':');
        js.push_str(&self.opts.opt_space);
        js.push_str(&self.expression(alternate, Precedence::ASSIGNMENT, child_ctx)?);
        Ok(parenthesize(js, Precedence::CONDITIONAL, precedence))
    }

    /// Shared by `BinaryExpression` and `LogicalExpression`; `is_in` marks
    /// the bare `in` operator, which must be parenthesized wherever a
    /// `for`-head could otherwise capture it.
    pub(super) fn emit_binary_expression(
        &mut self,
        operator: &str,
        operator_precedence: Precedence,
        is_in: bool,
        left: &Expression,
        right: &Expression,
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        let mut parens = operator_precedence < precedence;
        let allow_in = ctx.allow_in() || parens;
        let operand_ctx = ExprContext::threading_in(allow_in);
        parens |= is_in && !allow_in;

        let left_js = self.expression(left, operator_precedence, operand_ctx)?;

        // `x/` directly before `in`/`instanceof` would lex as a regex start.
        let mut js = if left_js.ends_with('/') && operator.starts_with(is_identifier_part) {
            format!("{left_js}{}{operator}", self.opts.space)
        } else {
            self.join(&left_js, operator)
        };

        // Left-associative: the right operand needs one rank tighter to keep
        // its own grouping.
        let right_js = self.expression(right, operator_precedence.next(), operand_ctx)?;

        // `/` meeting `/`, or `<` meeting `!--`, would lex as a comment
        // opener.
        if (operator == "/" && right_js.starts_with('/'))
            || (operator.ends_with('<') && right_js.starts_with("!--"))
        {
            js.push_str(&self.opts.space);
            js.push_str(&right_js);
        } else {
            js = self.join(&js, &right_js);
        }

        if parens { Ok(format!("({js})")) } else { Ok(js) }
    }

    pub(super) fn emit_unary_expression(
        &mut self,
        operator: UnaryOperator,
        argument: &Expression,
        precedence: Precedence,
    ) -> Result<String> {
        let op = operator.as_str();
        let arg = self.expression(argument, Precedence::UNARY, ExprContext::all())?;

        // Keyword operators and compact output go through the joiner, which
        // separates `typeof x` but still glues `typeof[]`. Short symbolic
        // operators attach directly except where the edges would merge into
        // `++` or `--`.
        let js = if self.opts.opt_space.is_empty() || op.len() > 2 {
            self.join(op, &arg)
        } else {
            let mut js = String::from(op);
            if let (Some(left), Some(right)) = (op.chars().last(), arg.chars().next())
                && (((left == '+' || left == '-') && left == right)
                    || (is_identifier_part(left) && is_identifier_part(right)))
            {
                js.push_str(&self.opts.space);
            }
            js.push_str(&arg);
            js
        };
        Ok(parenthesize(js, Precedence::UNARY, precedence))
    }

    pub(super) fn emit_update_expression(
        &mut self,
        operator: UpdateOperator,
        argument: &Expression,
        prefix: bool,
        precedence: Precedence,
    ) -> Result<String> {
        if prefix {
            let arg = self.expression(argument, Precedence::UNARY, ExprContext::all())?;
            Ok(parenthesize(
                format!("{}{arg}", operator.as_str()),
                Precedence::UNARY,
                precedence,
            ))
        } else {
            let arg = self.expression(argument, Precedence::POSTFIX, ExprContext::all())?;
            Ok(parenthesize(
                format!("{arg}{}", operator.as_str()),
                Precedence::POSTFIX,
                precedence,
            ))
        }
    }

    pub(super) fn emit_yield_expression(
        &mut self,
        argument: Option<&Expression>,
        delegate: bool,
        precedence: Precedence,
    ) -> Result<String> {
        let mut js = String::from(if delegate { "yield*" } else { "yield" });
        if let Some(argument) = argument {
            let arg = self.expression(argument, Precedence::YIELD, ExprContext::all())?;
            js = self.join(&js, &arg);
        }
        Ok(parenthesize(js, Precedence::YIELD, precedence))
    }

    // =========================================================================
    // Calls, construction, member access
    // =========================================================================

    pub(super) fn emit_call_expression(
        &mut self,
        callee: &Expression,
        arguments: &[Expression],
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        // A call on the callee side of `new` is never allowed bare; wrapping
        // keeps the argument list attached to the call, not the `new`.
        let parens = !ctx.allow_call() || Precedence::CALL < precedence;

        let callee_ctx = ExprContext::ALLOW_IN | ExprContext::ALLOW_CALL;
        let mut js = self.expression(callee, Precedence::CALL, callee_ctx)?;
        js.push_str(&self.emit_argument_list(arguments)?);

        if parens { Ok(format!("({js})")) } else { Ok(js) }
    }

    pub(super) fn emit_new_expression(
        &mut self,
        callee: &Expression,
        arguments: &[Expression],
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        // The argument list may only be dropped when empty, when the format
        // allows it, and when no outer `new` needs this one kept explicit.
        let with_call =
            !ctx.allow_unparenthesized_new() || self.opts.parentheses || !arguments.is_empty();

        let mut callee_ctx = ExprContext::ALLOW_IN;
        callee_ctx.set(ExprContext::ALLOW_UNPARENTHESIZED_NEW, !with_call);
        let callee_js = self.expression(callee, Precedence::NEW, callee_ctx)?;

        let mut js = self.join("new", &callee_js);
        if with_call {
            js.push_str(&self.emit_argument_list(arguments)?);
        }
        Ok(parenthesize(js, Precedence::NEW, precedence))
    }

    pub(super) fn emit_member_expression(
        &mut self,
        object: &Expression,
        property: &Expression,
        computed: bool,
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        let mut object_ctx = ExprContext::ALLOW_IN;
        object_ctx.set(ExprContext::ALLOW_CALL, ctx.allow_call());

        let mut js = self.expression(object, Precedence::CALL, object_ctx)?;
        if !computed
            && let Expression::Literal(literal) = object
            && let LiteralValue::Number(_) = literal.value
            && needs_trailing_point(&js)
        {
            js.push('.');
        }

        if computed {
            let mut property_ctx = ExprContext::all();
            property_ctx.set(ExprContext::ALLOW_CALL, ctx.allow_call());
            js.push('[');
            js.push_str(&self.expression(property, Precedence::SEQUENCE, property_ctx)?);
            js.push(']');
        } else {
            js.push('.');
            match property {
                Expression::Identifier { name } => js.push_str(name),
                _ => js.push_str(&self.expression(
                    property,
                    Precedence::SEQUENCE,
                    ExprContext::all(),
                )?),
            }
        }
        Ok(parenthesize(js, Precedence::MEMBER, precedence))
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// The parameter list, parenthesized except for the one-identifier
    /// arrow shorthand.
    pub(super) fn emit_function_params(
        &mut self,
        function: &Function,
        arrow: bool,
    ) -> Result<String> {
        if arrow
            && function.rest.is_none()
            && function.defaults.is_empty()
            && function.params.len() == 1
            && let Expression::Identifier { name } = &function.params[0]
        {
            return Ok(name.clone());
        }

        let mut js = String::from("(");
        for (i, param) in function.params.iter().enumerate() {
            if i > 0 {
                js.push(',');
                js.push_str(&self.opts.opt_space);
            }
            // A parallel `defaults` entry renders the parameter as the
            // assignment `param = default`.
            match function.defaults.get(i).and_then(Option::as_ref) {
                Some(default) => js.push_str(&self.emit_assignment_expression(
                    AssignmentOperator::Assign,
                    param,
                    default,
                    Precedence::ASSIGNMENT,
                    ExprContext::all(),
                )?),
                None => {
                    js.push_str(&self.emit_binding_target(param, Precedence::ASSIGNMENT, true)?)
                }
            }
        }
        if let Some(rest) = &function.rest {
            if !function.params.is_empty() {
                js.push(',');
                js.push_str(&self.opts.opt_space);
            }
            js.push_str("...");
            js.push_str(&rest.name);
        }
        js.push(')');
        Ok(js)
    }

    /// Everything after the `function` keyword or method name: parameters,
    /// the arrow, and the body in either its block or expression form.
    pub(super) fn emit_function_content(
        &mut self,
        function: &Function,
        arrow: bool,
    ) -> Result<String> {
        let mut js = self.emit_function_params(function, arrow)?;
        if arrow {
            js.push_str(&self.opts.opt_space);
            js.push_str("=>");
        }

        match function.body.as_ref() {
            Node::Expression(expression) => {
                js.push_str(&self.opts.opt_space);
                let body =
                    self.expression(expression, Precedence::ASSIGNMENT, ExprContext::all())?;
                // An object literal here would parse as a block body.
                if body.starts_with('{') {
                    js.push('(');
                    js.push_str(&body);
                    js.push(')');
                } else {
                    js.push_str(&body);
                }
            }
            Node::Statement(statement) => {
                js.push_str(&self.adoption_prefix(statement));
                let ctx = StmtContext { function_body: true, ..StmtContext::default() };
                js.push_str(&self.statement(statement, ctx)?);
            }
        }
        Ok(js)
    }

    pub(super) fn emit_function_expression(&mut self, function: &Function) -> Result<String> {
        let mut js = String::from(if function.generator { "function*" } else { "function" });
        match &function.id {
            Some(id) => {
                js.push_str(if function.generator {
                    &self.opts.opt_space
                } else {
                    &self.opts.space
                });
                js.push_str(&id.name);
            }
            None => js.push_str(&self.opts.opt_space),
        }
        js.push_str(&self.emit_function_content(function, false)?);
        Ok(js)
    }

    pub(super) fn emit_arrow_function_expression(
        &mut self,
        function: &Function,
        precedence: Precedence,
    ) -> Result<String> {
        let js = self.emit_function_content(function, true)?;
        Ok(parenthesize(js, Precedence::ARROW_FUNCTION, precedence))
    }

    /// The parameter list and body of a property's backing function. A
    /// non-function value renders nothing, leaving just the key.
    fn emit_backing_function(&mut self, value: &Expression) -> Result<String> {
        match value {
            Expression::Function(function) => self.emit_function_content(function, false),
            Expression::ArrowFunction(function) => self.emit_function_content(function, true),
            _ => Ok(String::new()),
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(super) fn emit_class_expression(
        &mut self,
        id: Option<&Expression>,
        super_class: Option<&Expression>,
        body: &ClassBody,
    ) -> Result<String> {
        let mut js = String::from("class");
        if let Some(id) = id {
            let id_js = self.expression(id, Precedence::SEQUENCE, ExprContext::all())?;
            js = self.join(&js, &id_js);
        }
        if let Some(super_class) = super_class {
            let super_js =
                self.expression(super_class, Precedence::ASSIGNMENT, ExprContext::all())?;
            let extends = self.join("extends", &super_js);
            js = self.join(&js, &extends);
        }
        js.push_str(&self.opts.opt_space);
        js.push_str(&self.emit_class_body(body)?);
        Ok(js)
    }

    pub(super) fn emit_method_definition(&mut self, method: &MethodDefinition) -> Result<String> {
        let mut js = if method.is_static {
            format!("static{}", self.opts.opt_space)
        } else {
            String::new()
        };

        let key = self.emit_property_key(&method.key, method.computed)?;
        let body = self.emit_function_content(&method.value, false)?;
        let key_with_body = format!("{key}{body}");

        match method.kind {
            PropertyKind::Get => {
                let accessor = self.join("get", &key_with_body);
                js = self.join(&js, &accessor);
            }
            PropertyKind::Set => {
                let accessor = self.join("set", &key_with_body);
                js = self.join(&js, &accessor);
            }
            PropertyKind::Init if method.value.generator => {
                js.push('*');
                js.push_str(&key_with_body);
            }
            PropertyKind::Init => js = self.join(&js, &key_with_body),
        }
        Ok(js)
    }

    // =========================================================================
    // Array, object, and property forms
    // =========================================================================

    /// `ArrayExpression` and `ArrayPattern` share one layout: single
    /// elements stay inline, anything longer goes one element per line.
    /// Holes contribute their separating comma only, and a trailing hole
    /// needs a trailing comma to survive a reparse.
    pub(super) fn emit_array_like(
        &mut self,
        elements: &[Option<Expression>],
    ) -> Result<String> {
        if elements.is_empty() {
            return Ok("[]".to_string());
        }

        let multiline = elements.len() > 1;
        let previous = self.shift_indent();
        let mut js = String::from("[");
        let last = elements.len() - 1;
        for (i, element) in elements.iter().enumerate() {
            if multiline {
                js.push_str(&self.opts.newline);
                js.push_str(&self.indent);
            }
            if let Some(element) = element {
                js.push_str(&self.expression(
                    element,
                    Precedence::ASSIGNMENT,
                    ExprContext::all(),
                )?);
            }
            if i != last || element.is_none() {
                js.push(',');
            }
        }
        self.restore_indent(previous);
        if multiline {
            js.push_str(&self.opts.newline);
            js.push_str(&self.indent);
        }
        js.push(']');
        Ok(js)
    }

    pub(super) fn emit_object_expression(&mut self, properties: &[Property]) -> Result<String> {
        if properties.is_empty() {
            return Ok("{}".to_string());
        }

        let previous = self.shift_indent();
        let mut js = String::from("{");
        let last = properties.len() - 1;
        for (i, property) in properties.iter().enumerate() {
            js.push_str(&self.opts.newline);
            js.push_str(&self.indent);
            js.push_str(&self.emit_property(property)?);
            if i != last {
                js.push(',');
            }
        }
        self.restore_indent(previous);
        js.push_str(&self.opts.newline);
        js.push_str(&self.indent);
        js.push('}');
        Ok(js)
    }

    /// Patterns stay on one line while every member is a shorthand binding;
    /// a destructuring default or rename spreads the pattern out.
    pub(super) fn emit_object_pattern(&mut self, properties: &[Property]) -> Result<String> {
        if properties.is_empty() {
            return Ok("{}".to_string());
        }

        let multiline = if properties.len() == 1 {
            !matches!(properties[0].value, Expression::Identifier { .. })
        } else {
            properties.iter().any(|property| !property.shorthand)
        };

        let mut js = String::from("{");
        if multiline {
            js.push_str(&self.opts.newline);
        }
        let previous = self.shift_indent();
        let last = properties.len() - 1;
        for (i, property) in properties.iter().enumerate() {
            if multiline {
                js.push_str(&self.indent);
            }
            js.push_str(&self.emit_property(property)?);
            if i != last {
                js.push(',');
                js.push_str(if multiline { &self.opts.newline } else { &self.opts.opt_space });
            }
        }
        self.restore_indent(previous);
        if multiline {
            js.push_str(&self.opts.newline);
            js.push_str(&self.indent);
            js.push('}');
        } else {
            js.push('}');
        }
        Ok(js)
    }

    pub(super) fn emit_property_key(
        &mut self,
        key: &Expression,
        computed: bool,
    ) -> Result<String> {
        let js = self.expression(key, Precedence::SEQUENCE, ExprContext::all())?;
        if computed {
            return Ok(format!("[{js}]"));
        }
        Ok(js)
    }

    pub(super) fn emit_property(&mut self, property: &Property) -> Result<String> {
        let key = self.emit_property_key(&property.key, property.computed)?;

        match property.kind {
            PropertyKind::Get => {
                let body = self.emit_backing_function(&property.value)?;
                Ok(format!("get{}{key}{body}", self.opts.space))
            }
            PropertyKind::Set => {
                let body = self.emit_backing_function(&property.value)?;
                Ok(format!("set{}{key}{body}", self.opts.space))
            }
            PropertyKind::Init => {
                if property.shorthand {
                    return Ok(key);
                }
                if property.method {
                    let mut js = String::new();
                    if let Expression::Function(function) = &property.value
                        && function.generator
                    {
                        js.push('*');
                    }
                    js.push_str(&key);
                    js.push_str(&self.emit_backing_function(&property.value)?);
                    return Ok(js);
                }
                let value =
                    self.expression(&property.value, Precedence::ASSIGNMENT, ExprContext::all())?;
                Ok(format!("{key}:{}{value}", self.opts.opt_space))
            }
        }
    }

    pub(super) fn emit_spread_element(&mut self, argument: &Expression) -> Result<String> {
        let argument = self.expression(argument, Precedence::ASSIGNMENT, ExprContext::all())?;
        Ok(format!("...{argument}"))
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// Quasis are emitted from their raw text: a tagged template observes
    /// the raw form, so re-encoding from `cooked` would change behavior.
    pub(super) fn emit_template_literal(
        &mut self,
        template: &TemplateLiteral,
    ) -> Result<String> {
        let mut js = String::from("`");
        let last = template.quasis.len().saturating_sub(1);
        for (i, quasi) in template.quasis.iter().enumerate() {
            js.push_str(&quasi.value.raw);
            if i != last
                && let Some(expression) = template.expressions.get(i)
            {
                js.push_str("${");
                js.push_str(&self.opts.opt_space);
                js.push_str(&self.expression(
                    expression,
                    Precedence::SEQUENCE,
                    ExprContext::all(),
                )?);
                js.push_str(&self.opts.opt_space);
                js.push('}');
            }
        }
        js.push('`');
        Ok(js)
    }

    pub(super) fn emit_tagged_template_expression(
        &mut self,
        tag: &Expression,
        quasi: &TemplateLiteral,
        precedence: Precedence,
        ctx: ExprContext,
    ) -> Result<String> {
        let mut tag_ctx = ExprContext::ALLOW_IN;
        tag_ctx.set(ExprContext::ALLOW_CALL, ctx.allow_call());

        let mut js = self.expression(tag, Precedence::CALL, tag_ctx)?;
        js.push_str(&self.emit_template_literal(quasi)?);
        Ok(parenthesize(js, Precedence::TAGGED_TEMPLATE, precedence))
    }

    // =========================================================================
    // Comprehensions
    // =========================================================================

    /// Array comprehensions and generator expressions differ only in their
    /// delimiters. The body is rendered first but emitted last, after the
    /// `for` blocks and the optional `if` filter.
    pub(super) fn emit_comprehension(
        &mut self,
        body: &Expression,
        blocks: &[ComprehensionBlock],
        filter: Option<&Expression>,
        generator: bool,
    ) -> Result<String> {
        let mut js = String::from(if generator { "(" } else { "[" });
        let body_js = self.expression(body, Precedence::ASSIGNMENT, ExprContext::all())?;

        if !blocks.is_empty() {
            let previous = self.shift_indent();
            for (i, block) in blocks.iter().enumerate() {
                let block_js = self.emit_comprehension_block(block)?;
                if i > 0 {
                    js = self.join(&js, &block_js);
                } else {
                    js.push_str(&block_js);
                }
            }
            self.restore_indent(previous);
        }

        if let Some(filter) = filter {
            let filter_js = self.expression(filter, Precedence::SEQUENCE, ExprContext::all())?;
            js = self.join(&js, &format!("if{}", self.opts.opt_space));
            js = self.join(&js, &format!("({filter_js})"));
        }

        js = self.join(&js, &body_js);
        js.push(if generator { ')' } else { ']' });
        Ok(js)
    }

    pub(super) fn emit_comprehension_block(
        &mut self,
        block: &ComprehensionBlock,
    ) -> Result<String> {
        let right = self.expression(&block.right, Precedence::SEQUENCE, ExprContext::all())?;

        let left = match &block.left {
            ForInit::Declaration(declaration) => {
                let mut left = format!("{}{}", declaration.kind.as_str(), self.opts.space);
                if let Some(declarator) = declaration.declarations.first() {
                    left.push_str(&self.emit_variable_declarator(declarator, false)?);
                }
                left
            }
            ForInit::Expression(expression) => {
                self.expression(expression, Precedence::CALL, ExprContext::all())?
            }
        };

        let left = self.join(&left, if block.of { "of" } else { "in" });
        let head = self.join(&left, &right);
        Ok(format!("for{}({head})", self.opts.opt_space))
    }

    // =========================================================================
    // Verbatim passthrough
    // =========================================================================

    /// Pre-rendered text dropped into the output as-is, except that its
    /// line breaks are re-indented to the current level.
    pub(super) fn emit_verbatim(
        &self,
        content: &str,
        declared: Precedence,
        required: Precedence,
    ) -> String {
        let mut js = String::new();
        for (i, chunk) in content.split('\n').enumerate() {
            let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
            if i > 0 {
                js.push_str(&self.opts.newline);
                js.push_str(&self.indent);
            }
            js.push_str(chunk);
        }
        parenthesize(js, declared, required)
    }
}

/// Whether a rendered numeric literal needs a guarding `.` before a `.`
/// member access: it must end in a decimal digit and contain no decimal
/// point, exponent, or hex marker already, and legacy octal forms
/// (`017`) cannot take one at all.
fn needs_trailing_point(num: &str) -> bool {
    if !num.ends_with(|ch: char| ch.is_ascii_digit()) {
        return false;
    }
    if num.contains(['.', 'e', 'E', 'x', 'X']) {
        return false;
    }
    let bytes = num.as_bytes();
    !(bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit())
}
