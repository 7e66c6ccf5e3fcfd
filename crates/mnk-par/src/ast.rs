//! AST node definitions for the Monkey language.
//!
//! Nodes carry the token they originate from, so `token_literal()` can
//! report the source lexeme, and implement `Display` with the canonical
//! rendering asserted by parser tests: fully parenthesized expressions,
//! `let <name> = <value>;` statements, and so on.

use std::fmt;

use mnk_lex::Token;

/// Any AST node: a whole program, a statement, or an expression.
///
/// This is the unit the generic [`modify`](crate::modify::modify)
/// traversal rewrites, and the payload carried by a `Quote` value.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Program(Program),
    Statement(Statement),
    Expression(Expression),
}

impl Node {
    /// The literal text of the token this node originates from.
    pub fn token_literal(&self) -> &str {
        match self {
            Node::Program(program) => program.token_literal(),
            Node::Statement(stmt) => stmt.token_literal(),
            Node::Expression(expr) => expr.token_literal(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Program(program) => write!(f, "{}", program),
            Node::Statement(stmt) => write!(f, "{}", stmt),
            Node::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

/// The root of a parsed source file: an ordered sequence of statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or("")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

/// A statement node.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let(LetStatement),
    /// `return <value>;`
    Return(ReturnStatement),
    /// A bare expression, with optional trailing semicolon.
    Expression(ExpressionStatement),
    /// `{ <statements> }`
    Block(BlockStatement),
    /// `while (<condition>) { <body> }`
    While(WhileStatement),
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let(s) => &s.token.literal,
            Statement::Return(s) => &s.token.literal,
            Statement::Expression(s) => &s.token.literal,
            Statement::Block(s) => &s.token.literal,
            Statement::While(s) => &s.token.literal,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(s) => write!(f, "let {} = {};", s.name, s.value),
            Statement::Return(s) => write!(f, "return {};", s.return_value),
            Statement::Expression(s) => write!(f, "{}", s.expression),
            Statement::Block(s) => write!(f, "{}", s),
            Statement::While(s) => write!(f, "while ({}) {}", s.condition, s.body),
        }
    }
}

/// `let <name> = <value>;`
#[derive(Clone, Debug, PartialEq)]
pub struct LetStatement {
    /// The `let` token.
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

/// `return <value>;`
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    /// The `return` token.
    pub token: Token,
    pub return_value: Expression,
}

/// An expression in statement position.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStatement {
    /// The first token of the expression.
    pub token: Token,
    pub expression: Expression,
}

/// A brace-delimited sequence of statements.
///
/// Renders as the concatenation of its statements, without braces.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockStatement {
    /// The `{` token.
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// `while (<condition>) { <body> }`
#[derive(Clone, Debug, PartialEq)]
pub struct WhileStatement {
    /// The `while` token.
    pub token: Token,
    pub condition: Expression,
    pub body: BlockStatement,
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Str(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
    Array(ArrayLiteral),
    Index(IndexExpression),
    Hash(HashLiteral),
    Macro(MacroLiteral),
}

impl Expression {
    pub fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(e) => &e.token.literal,
            Expression::Integer(e) => &e.token.literal,
            Expression::Str(e) => &e.token.literal,
            Expression::Boolean(e) => &e.token.literal,
            Expression::Prefix(e) => &e.token.literal,
            Expression::Infix(e) => &e.token.literal,
            Expression::If(e) => &e.token.literal,
            Expression::Function(e) => &e.token.literal,
            Expression::Call(e) => &e.token.literal,
            Expression::Array(e) => &e.token.literal,
            Expression::Index(e) => &e.token.literal,
            Expression::Hash(e) => &e.token.literal,
            Expression::Macro(e) => &e.token.literal,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(e) => f.write_str(&e.value),
            Expression::Integer(e) => write!(f, "{}", e.value),
            Expression::Str(e) => f.write_str(&e.value),
            Expression::Boolean(e) => write!(f, "{}", e.value),
            Expression::Prefix(e) => write!(f, "({}{})", e.operator, e.right),
            Expression::Infix(e) => write!(f, "({} {} {})", e.left, e.operator, e.right),
            Expression::If(e) => {
                write!(f, "if {} {}", e.condition, e.consequence)?;
                if let Some(alternative) = &e.alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expression::Function(e) => {
                write!(f, "fn({}) {}", join_identifiers(&e.parameters), e.body)
            }
            Expression::Call(e) => {
                write!(f, "{}({})", e.function, join_expressions(&e.arguments))
            }
            Expression::Array(e) => write!(f, "[{}]", join_expressions(&e.elements)),
            Expression::Index(e) => write!(f, "({}[{}])", e.left, e.index),
            Expression::Hash(e) => {
                let pairs: Vec<String> = e
                    .pairs
                    .iter()
                    .map(|(key, value)| format!("{}:{}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Expression::Macro(e) => {
                write!(f, "macro({}) {}", join_identifiers(&e.parameters), e.body)
            }
        }
    }
}

fn join_expressions(exprs: &[Expression]) -> String {
    exprs
        .iter()
        .map(Expression::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_identifiers(idents: &[Identifier]) -> String {
    idents
        .iter()
        .map(|ident| ident.value.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A name in source: `foobar`, `x`, ...
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A decimal integer literal, parsed as a signed 64-bit value.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

/// A double-quoted string literal.
#[derive(Clone, Debug, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

/// `true` or `false`.
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

/// `<operator><right>`, e.g. `!ok` or `-5`.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

/// `<left> <operator> <right>`.
#[derive(Clone, Debug, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

/// `if <condition> { <consequence> }` with optional `else { <alternative> }`.
#[derive(Clone, Debug, PartialEq)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// `fn(<parameters>) { <body> }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

/// `<function>(<arguments>)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpression {
    /// The `(` token.
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// `[<elements>]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

/// `<left>[<index>]`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpression {
    /// The `[` token.
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

/// `{<key>: <value>, ...}`.
///
/// Pairs keep their source order so a `modify` pass and `Display` both see
/// a deterministic sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct HashLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

/// `macro(<parameters>) { <body> }`.
#[derive(Clone, Debug, PartialEq)]
pub struct MacroLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}
