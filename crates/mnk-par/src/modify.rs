//! Generic bottom-up AST rewriting.
//!
//! [`modify`] walks every child position of a node, replaces each child
//! with the result of the supplied function, and finally applies the
//! function to the node itself. Children are always transformed before
//! their parent. This traversal is the foundation of `unquote` splicing
//! and macro expansion.
//!
//! The function may swap a node for a different variant of the same
//! category (an expression for another expression). Replacing a node
//! across categories (a statement where an expression is required) is an
//! internal error and halts.

use crate::ast::{BlockStatement, Expression, Identifier, Node, Statement};

/// Rewrites `node` bottom-up with `f`.
///
/// # Example
///
/// ```
/// use mnk_par::ast::{Expression, Node};
/// use mnk_par::{modify, parse};
///
/// let program = parse("1 + 2").unwrap();
/// let doubled = modify(Node::Program(program), &mut |node| match node {
///     Node::Expression(Expression::Integer(mut int)) => {
///         int.value *= 2;
///         Node::Expression(Expression::Integer(int))
///     }
///     other => other,
/// });
/// assert_eq!(doubled.to_string(), "(2 + 4)");
/// ```
pub fn modify<F>(node: Node, f: &mut F) -> Node
where
    F: FnMut(Node) -> Node,
{
    let node = match node {
        Node::Program(mut program) => {
            program.statements = program
                .statements
                .into_iter()
                .map(|stmt| modify_statement(stmt, f))
                .collect();
            Node::Program(program)
        }
        Node::Statement(stmt) => Node::Statement(modify_statement_children(stmt, f)),
        Node::Expression(expr) => Node::Expression(modify_expression_children(expr, f)),
    };

    f(node)
}

fn modify_statement_children<F>(stmt: Statement, f: &mut F) -> Statement
where
    F: FnMut(Node) -> Node,
{
    match stmt {
        Statement::Let(mut s) => {
            s.value = modify_expression(s.value, f);
            Statement::Let(s)
        }
        Statement::Return(mut s) => {
            s.return_value = modify_expression(s.return_value, f);
            Statement::Return(s)
        }
        Statement::Expression(mut s) => {
            s.expression = modify_expression(s.expression, f);
            Statement::Expression(s)
        }
        Statement::Block(mut s) => {
            s.statements = s
                .statements
                .into_iter()
                .map(|stmt| modify_statement(stmt, f))
                .collect();
            Statement::Block(s)
        }
        Statement::While(mut s) => {
            s.condition = modify_expression(s.condition, f);
            s.body = modify_block(s.body, f);
            Statement::While(s)
        }
    }
}

fn modify_expression_children<F>(expr: Expression, f: &mut F) -> Expression
where
    F: FnMut(Node) -> Node,
{
    match expr {
        Expression::Prefix(mut e) => {
            e.right = Box::new(modify_expression(*e.right, f));
            Expression::Prefix(e)
        }
        Expression::Infix(mut e) => {
            e.left = Box::new(modify_expression(*e.left, f));
            e.right = Box::new(modify_expression(*e.right, f));
            Expression::Infix(e)
        }
        Expression::Index(mut e) => {
            e.left = Box::new(modify_expression(*e.left, f));
            e.index = Box::new(modify_expression(*e.index, f));
            Expression::Index(e)
        }
        Expression::If(mut e) => {
            e.condition = Box::new(modify_expression(*e.condition, f));
            e.consequence = modify_block(e.consequence, f);
            e.alternative = e.alternative.map(|alt| modify_block(alt, f));
            Expression::If(e)
        }
        Expression::Function(mut e) => {
            e.parameters = e
                .parameters
                .into_iter()
                .map(|param| modify_identifier(param, f))
                .collect();
            e.body = modify_block(e.body, f);
            Expression::Function(e)
        }
        Expression::Array(mut e) => {
            e.elements = e
                .elements
                .into_iter()
                .map(|element| modify_expression(element, f))
                .collect();
            Expression::Array(e)
        }
        Expression::Hash(mut e) => {
            e.pairs = e
                .pairs
                .into_iter()
                .map(|(key, value)| (modify_expression(key, f), modify_expression(value, f)))
                .collect();
            Expression::Hash(e)
        }
        // Leaves, and the nodes whose children the traversal does not
        // enter: call arguments and macro bodies are rewritten only when
        // the call or macro node itself is replaced.
        other => other,
    }
}

/// Modifies a statement in place of a statement, including `f` on the
/// statement itself.
fn modify_statement<F>(stmt: Statement, f: &mut F) -> Statement
where
    F: FnMut(Node) -> Node,
{
    match modify(Node::Statement(stmt), f) {
        Node::Statement(stmt) => stmt,
        _ => panic!("modifier replaced a statement with a non-statement node"),
    }
}

/// Modifies an expression in place of an expression.
fn modify_expression<F>(expr: Expression, f: &mut F) -> Expression
where
    F: FnMut(Node) -> Node,
{
    match modify(Node::Expression(expr), f) {
        Node::Expression(expr) => expr,
        _ => panic!("modifier replaced an expression with a non-expression node"),
    }
}

fn modify_block<F>(block: BlockStatement, f: &mut F) -> BlockStatement
where
    F: FnMut(Node) -> Node,
{
    match modify(Node::Statement(Statement::Block(block)), f) {
        Node::Statement(Statement::Block(block)) => block,
        _ => panic!("modifier replaced a block statement with a different node"),
    }
}

fn modify_identifier<F>(ident: Identifier, f: &mut F) -> Identifier
where
    F: FnMut(Node) -> Node,
{
    match modify(Node::Expression(Expression::Identifier(ident)), f) {
        Node::Expression(Expression::Identifier(ident)) => ident,
        _ => panic!("modifier replaced a parameter with a non-identifier node"),
    }
}
