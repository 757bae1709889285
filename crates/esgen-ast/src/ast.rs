//! ESTree-style syntax tree nodes.
//!
//! The tree is a pair of closed enums, [`Expression`] and [`Statement`],
//! plus the auxiliary node structs that only ever appear inside specific
//! parents (properties, switch cases, catch clauses, declarators, template
//! elements). Children are owned exclusively through `Box`/`Vec`; there is
//! no sharing and no parent links.
//!
//! Every node kind deserializes from its ESTree JSON form: the enums are
//! internally tagged on `"type"`, auxiliary structs simply ignore the tag,
//! and unknown metadata fields (`loc`, `range`, comments) are skipped.
//! Legacy shapes are normalized here, at the ingestion boundary, so the
//! emitter only ever sees one canonical representation:
//!
//! - `TryStatement` folds `handler` / `handlers` / `guardedHandlers`
//!   (single node or array each) into one `Vec<CatchClause>`.
//! - `Literal` resolves the `regex` sibling field against `value`.

use serde::Deserialize;

use crate::precedence::Precedence;

// =============================================================================
// Identifiers and literals
// =============================================================================

/// A bare identifier in a non-expression slot (labels, import/export names,
/// declaration ids). Deserializes from an ESTree `Identifier` node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The value payload of a [`Literal`] node.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// A regular expression literal, kept as its parsed parts. ESTree
    /// carries these in a `regex` sibling object because the `value` slot
    /// cannot represent one in JSON.
    Regex { pattern: String, flags: String },
}

/// A literal node. `raw` preserves the original source token when the
/// producing parser recorded it; the emitter may re-use it verbatim after a
/// verification reparse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LiteralShape")]
pub struct Literal {
    pub value: LiteralValue,
    pub raw: Option<String>,
}

impl Literal {
    pub fn null() -> Self {
        Self { value: LiteralValue::Null, raw: None }
    }

    pub fn boolean(value: bool) -> Self {
        Self { value: LiteralValue::Boolean(value), raw: None }
    }

    pub fn number(value: f64) -> Self {
        Self { value: LiteralValue::Number(value), raw: None }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self { value: LiteralValue::String(value.into()), raw: None }
    }

    pub fn regex(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            value: LiteralValue::Regex { pattern: pattern.into(), flags: flags.into() },
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

/// Raw ESTree shape of a literal: a JSON scalar `value`, an optional `raw`
/// token, and an optional `regex` object that takes priority over `value`.
#[derive(Deserialize)]
struct LiteralShape {
    #[serde(default)]
    value: ScalarValue,
    #[serde(default)]
    raw: Option<String>,
    #[serde(default)]
    regex: Option<RegexShape>,
}

#[derive(Deserialize, Default)]
#[serde(untagged)]
enum ScalarValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// Regex literals arrive with an opaque object in `value`; the payload
    /// lives in the `regex` sibling.
    Opaque(serde::de::IgnoredAny),
}

#[derive(Deserialize)]
struct RegexShape {
    pattern: String,
    #[serde(default)]
    flags: String,
}

impl From<LiteralShape> for Literal {
    fn from(shape: LiteralShape) -> Self {
        let value = match shape.regex {
            Some(re) => LiteralValue::Regex { pattern: re.pattern, flags: re.flags },
            None => match shape.value {
                ScalarValue::Null => LiteralValue::Null,
                ScalarValue::Boolean(b) => LiteralValue::Boolean(b),
                ScalarValue::Number(n) => LiteralValue::Number(n),
                ScalarValue::String(s) => LiteralValue::String(s),
                // Non-scalar value with no regex sibling degrades to null.
                ScalarValue::Opaque(_) => LiteralValue::Null,
            },
        };
        Self { value, raw: shape.raw }
    }
}

// =============================================================================
// Operators
// =============================================================================

/// Binary operator tokens, including the legacy `is` / `isnt` comparison
/// forms the precedence table still ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "||")]
    LogicalOr,
    #[serde(rename = "&&")]
    LogicalAnd,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "===")]
    StrictEquals,
    #[serde(rename = "!==")]
    StrictNotEquals,
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "isnt")]
    Isnt,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<=")]
    LessThanEquals,
    #[serde(rename = ">=")]
    GreaterThanEquals,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    InstanceOf,
    #[serde(rename = "<<")]
    LeftShift,
    #[serde(rename = ">>")]
    RightShift,
    #[serde(rename = ">>>")]
    UnsignedRightShift,
    #[serde(rename = "+")]
    Addition,
    #[serde(rename = "-")]
    Subtraction,
    #[serde(rename = "*")]
    Multiplication,
    #[serde(rename = "/")]
    Division,
    #[serde(rename = "%")]
    Modulo,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LogicalOr => "||",
            Self::LogicalAnd => "&&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitwiseAnd => "&",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::StrictEquals => "===",
            Self::StrictNotEquals => "!==",
            Self::Is => "is",
            Self::Isnt => "isnt",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanEquals => "<=",
            Self::GreaterThanEquals => ">=",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiplication => "*",
            Self::Division => "/",
            Self::Modulo => "%",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Self::LogicalOr => Precedence::LOGICAL_OR,
            Self::LogicalAnd => Precedence::LOGICAL_AND,
            Self::BitwiseOr => Precedence::BITWISE_OR,
            Self::BitwiseXor => Precedence::BITWISE_XOR,
            Self::BitwiseAnd => Precedence::BITWISE_AND,
            Self::Equals | Self::NotEquals | Self::StrictEquals | Self::StrictNotEquals => {
                Precedence::EQUALITY
            }
            Self::Is | Self::Isnt => Precedence::EQUALITY,
            Self::LessThan
            | Self::GreaterThan
            | Self::LessThanEquals
            | Self::GreaterThanEquals
            | Self::In
            | Self::InstanceOf => Precedence::RELATIONAL,
            Self::LeftShift | Self::RightShift | Self::UnsignedRightShift => {
                Precedence::BITWISE_SHIFT
            }
            Self::Addition | Self::Subtraction => Precedence::ADDITIVE,
            Self::Multiplication | Self::Division | Self::Modulo => Precedence::MULTIPLICATIVE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Self::Or => Precedence::LOGICAL_OR,
            Self::And => Precedence::LOGICAL_AND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "!")]
    LogicalNot,
    #[serde(rename = "~")]
    BitwiseNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::LogicalNot => "!",
            Self::BitwiseNot => "~",
            Self::Typeof => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubtractAssign,
    #[serde(rename = "*=")]
    MultiplyAssign,
    #[serde(rename = "/=")]
    DivideAssign,
    #[serde(rename = "%=")]
    ModuloAssign,
    #[serde(rename = "<<=")]
    LeftShiftAssign,
    #[serde(rename = ">>=")]
    RightShiftAssign,
    #[serde(rename = ">>>=")]
    UnsignedRightShiftAssign,
    #[serde(rename = "|=")]
    BitwiseOrAssign,
    #[serde(rename = "^=")]
    BitwiseXorAssign,
    #[serde(rename = "&=")]
    BitwiseAndAssign,
}

impl AssignmentOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubtractAssign => "-=",
            Self::MultiplyAssign => "*=",
            Self::DivideAssign => "/=",
            Self::ModuloAssign => "%=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftAssign => ">>=",
            Self::UnsignedRightShiftAssign => ">>>=",
            Self::BitwiseOrAssign => "|=",
            Self::BitwiseXorAssign => "^=",
            Self::BitwiseAndAssign => "&=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DeclarationKind {
    #[serde(rename = "var")]
    Var,
    #[serde(rename = "let")]
    Let,
    #[serde(rename = "const")]
    Const,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// Every expression node kind, tagged exactly as in ESTree JSON.
///
/// `ArrayPattern`/`ObjectPattern` live here too: this grammar generation
/// predates a separate pattern hierarchy and renders patterns through the
/// same rules as their expression counterparts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    #[serde(rename = "ThisExpression")]
    This,
    Identifier {
        name: String,
    },
    Literal(Literal),
    SequenceExpression {
        expressions: Vec<Expression>,
    },
    AssignmentExpression {
        operator: AssignmentOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    ConditionalExpression {
        test: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
    },
    LogicalExpression {
        operator: LogicalOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    UnaryExpression {
        operator: UnaryOperator,
        argument: Box<Expression>,
    },
    UpdateExpression {
        operator: UpdateOperator,
        argument: Box<Expression>,
        #[serde(default)]
        prefix: bool,
    },
    YieldExpression {
        #[serde(default)]
        argument: Option<Box<Expression>>,
        #[serde(default)]
        delegate: bool,
    },
    CallExpression {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    NewExpression {
        callee: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    MemberExpression {
        object: Box<Expression>,
        property: Box<Expression>,
        #[serde(default)]
        computed: bool,
    },
    #[serde(rename = "FunctionExpression")]
    Function(Function),
    #[serde(rename = "ArrowFunctionExpression")]
    ArrowFunction(Function),
    ClassExpression {
        #[serde(default)]
        id: Option<Box<Expression>>,
        #[serde(rename = "superClass", default)]
        super_class: Option<Box<Expression>>,
        body: ClassBody,
    },
    ArrayExpression {
        elements: Vec<Option<Expression>>,
    },
    ArrayPattern {
        elements: Vec<Option<Expression>>,
    },
    ObjectExpression {
        properties: Vec<Property>,
    },
    ObjectPattern {
        properties: Vec<Property>,
    },
    SpreadElement {
        argument: Box<Expression>,
    },
    TemplateLiteral(TemplateLiteral),
    TaggedTemplateExpression {
        tag: Box<Expression>,
        quasi: TemplateLiteral,
    },
    ComprehensionExpression {
        body: Box<Expression>,
        #[serde(default)]
        blocks: Vec<ComprehensionBlock>,
        #[serde(default)]
        filter: Option<Box<Expression>>,
    },
    GeneratorExpression {
        body: Box<Expression>,
        #[serde(default)]
        blocks: Vec<ComprehensionBlock>,
        #[serde(default)]
        filter: Option<Box<Expression>>,
    },
    /// Pre-rendered text injected into the tree, bypassing normal
    /// generation. `precedence` declares how tightly the content binds so
    /// the emitter can parenthesize it; absent means [`Precedence::SEQUENCE`]
    /// (wrapped whenever the slot requires anything at all).
    Verbatim {
        content: String,
        #[serde(default)]
        precedence: Option<Precedence>,
    },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn literal(literal: Literal) -> Self {
        Self::Literal(literal)
    }

    pub fn number(value: f64) -> Self {
        Self::Literal(Literal::number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::string(value))
    }
}

/// Shared payload of `FunctionDeclaration`, `FunctionExpression` and
/// `ArrowFunctionExpression`.
///
/// `defaults` lines up with `params` (old esprima emits it as a parallel
/// array with `null` holes); `rest` is the pre-ES6 rest parameter slot. The
/// body may be a block statement or, for arrows, a bare expression.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub id: Option<Ident>,
    pub params: Vec<Expression>,
    #[serde(default)]
    pub defaults: Vec<Option<Expression>>,
    #[serde(default)]
    pub rest: Option<Ident>,
    pub body: Box<Node>,
    #[serde(default)]
    pub generator: bool,
}

/// An object literal / pattern member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub key: Expression,
    pub value: Expression,
    #[serde(default)]
    pub kind: PropertyKind,
    #[serde(default)]
    pub shorthand: bool,
    #[serde(default)]
    pub method: bool,
    #[serde(default)]
    pub computed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PropertyKind {
    #[default]
    #[serde(rename = "init", alias = "", alias = "method", alias = "constructor")]
    Init,
    #[serde(rename = "get")]
    Get,
    #[serde(rename = "set")]
    Set,
}

/// A class member. `value` is the backing function; accessor-ness comes
/// from `kind`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodDefinition {
    pub key: Expression,
    pub value: Function,
    #[serde(default)]
    pub kind: PropertyKind,
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(default)]
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassBody {
    pub body: Vec<MethodDefinition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
}

/// One cooked/raw chunk of a template literal. Only `raw` is rendered:
/// tagged templates observe the raw text, so emitting from `cooked` would
/// change program behavior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateElement {
    pub value: TemplateElementValue,
    #[serde(default)]
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateElementValue {
    pub raw: String,
    #[serde(default)]
    pub cooked: Option<String>,
}

/// One `for (left of/in right)` clause of a comprehension.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComprehensionBlock {
    pub left: ForInit,
    pub right: Box<Expression>,
    #[serde(default)]
    pub of: bool,
}

// =============================================================================
// Statements
// =============================================================================

/// Every statement node kind, tagged exactly as in ESTree JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    Program {
        body: Vec<Statement>,
    },
    BlockStatement {
        body: Vec<Statement>,
    },
    ExpressionStatement {
        expression: Box<Expression>,
    },
    /// A directive-prologue entry (`'use strict'` and friends) that a
    /// parser chose to surface as its own node kind rather than as an
    /// expression statement.
    DirectiveStatement {
        directive: String,
        #[serde(default)]
        raw: Option<String>,
    },
    EmptyStatement,
    DebuggerStatement,
    IfStatement {
        test: Box<Expression>,
        consequent: Box<Statement>,
        #[serde(default)]
        alternate: Option<Box<Statement>>,
    },
    WhileStatement {
        test: Box<Expression>,
        body: Box<Statement>,
    },
    DoWhileStatement {
        body: Box<Statement>,
        test: Box<Expression>,
    },
    ForStatement {
        #[serde(default)]
        init: Option<ForInit>,
        #[serde(default)]
        test: Option<Box<Expression>>,
        #[serde(default)]
        update: Option<Box<Expression>>,
        body: Box<Statement>,
    },
    ForInStatement {
        left: ForInit,
        right: Box<Expression>,
        body: Box<Statement>,
    },
    ForOfStatement {
        left: ForInit,
        right: Box<Expression>,
        body: Box<Statement>,
    },
    SwitchStatement {
        discriminant: Box<Expression>,
        #[serde(default)]
        cases: Vec<SwitchCase>,
    },
    BreakStatement {
        #[serde(default)]
        label: Option<Ident>,
    },
    ContinueStatement {
        #[serde(default)]
        label: Option<Ident>,
    },
    ReturnStatement {
        #[serde(default)]
        argument: Option<Box<Expression>>,
    },
    ThrowStatement {
        argument: Box<Expression>,
    },
    #[serde(rename = "TryStatement")]
    Try(TryStatement),
    LabeledStatement {
        label: Ident,
        body: Box<Statement>,
    },
    WithStatement {
        object: Box<Expression>,
        body: Box<Statement>,
    },
    #[serde(rename = "VariableDeclaration")]
    VariableDeclaration(VariableDeclaration),
    #[serde(rename = "FunctionDeclaration")]
    FunctionDeclaration(Function),
    ClassDeclaration {
        id: Ident,
        #[serde(rename = "superClass", default)]
        super_class: Option<Box<Expression>>,
        body: ClassBody,
    },
    ImportDeclaration {
        #[serde(default)]
        specifiers: Vec<ImportSpecifier>,
        source: Literal,
    },
    ExportDeclaration {
        #[serde(rename = "default", default)]
        default: bool,
        #[serde(default)]
        declaration: Option<Box<Node>>,
        #[serde(default)]
        specifiers: Option<Vec<ExportSpecifier>>,
        #[serde(default)]
        source: Option<Literal>,
    },
    /// Old module-draft `module id from 'source';` form.
    ModuleDeclaration {
        id: Ident,
        source: Literal,
    },
}

/// `var`/`let`/`const` with its declarator list. A standalone struct so the
/// same payload can sit in statement position and in `for`-heads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableDeclaration {
    pub kind: DeclarationKind,
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableDeclarator {
    pub id: Expression,
    #[serde(default)]
    pub init: Option<Expression>,
}

/// `for`-head initializer, and the left-hand side of `for-in`/`for-of` and
/// comprehension blocks: either a declaration or a plain target expression.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ForInit {
    Declaration(VariableDeclaration),
    Expression(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwitchCase {
    /// `None` is the `default:` clause.
    #[serde(default)]
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
}

/// A `catch` clause. `guard` is the SpiderMonkey `catch (e if cond)`
/// extension.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatchClause {
    pub param: Expression,
    #[serde(default)]
    pub guard: Option<Expression>,
    pub body: Box<Statement>,
}

/// `try` with its handlers already normalized to a flat clause list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TryShape")]
pub struct TryStatement {
    pub block: Box<Statement>,
    pub handlers: Vec<CatchClause>,
    pub finalizer: Option<Box<Statement>>,
}

impl TryStatement {
    pub fn new(
        block: Statement,
        handlers: Vec<CatchClause>,
        finalizer: Option<Statement>,
    ) -> Self {
        Self {
            block: Box::new(block),
            handlers,
            finalizer: finalizer.map(Box::new),
        }
    }
}

/// The historical shapes a `try` arrives in: a modern single `handler`, an
/// array-valued `handler`, a `handlers` array, or a `guardedHandlers`
/// array. Normalization order: `handlers` wins over `guardedHandlers`, and
/// whatever `handler` holds is appended after either.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TryShape {
    block: Box<Statement>,
    #[serde(default)]
    handler: Option<OneOrMany<CatchClause>>,
    #[serde(default)]
    handlers: Option<Vec<CatchClause>>,
    #[serde(default)]
    guarded_handlers: Option<Vec<CatchClause>>,
    #[serde(default)]
    finalizer: Option<Box<Statement>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl From<TryShape> for TryStatement {
    fn from(shape: TryShape) -> Self {
        let mut handlers = shape.handlers.or(shape.guarded_handlers).unwrap_or_default();
        match shape.handler {
            Some(OneOrMany::One(clause)) => handlers.push(clause),
            Some(OneOrMany::Many(clauses)) => handlers.extend(clauses),
            None => {}
        }
        Self { block: shape.block, handlers, finalizer: shape.finalizer }
    }
}

// =============================================================================
// Module specifiers
// =============================================================================

/// Old-draft import specifier: `id`, an optional `as` alias, and a flag
/// marking the leading default-import binding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportSpecifier {
    pub id: Ident,
    #[serde(default)]
    pub name: Option<Ident>,
    #[serde(rename = "default", default)]
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ExportSpecifier {
    #[serde(rename = "ExportSpecifier")]
    Named {
        id: Ident,
        #[serde(default)]
        name: Option<Ident>,
    },
    #[serde(rename = "ExportBatchSpecifier")]
    Batch,
}

// =============================================================================
// Root
// =============================================================================

/// Any generatable root: the driver dispatches on which side this is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Statement(Statement),
    Expression(Expression),
}

impl From<Statement> for Node {
    fn from(statement: Statement) -> Self {
        Self::Statement(statement)
    }
}

impl From<Expression> for Node {
    fn from(expression: Expression) -> Self {
        Self::Expression(expression)
    }
}

impl Node {
    pub fn program(body: Vec<Statement>) -> Self {
        Self::Statement(Statement::Program { body })
    }
}
