//! `quote`/`unquote` support.
//!
//! `quote(expr)` reifies its argument as a `Quote` value without
//! evaluating it. Before wrapping, every nested `unquote(expr)` call is
//! replaced, via the generic `modify` traversal, with an AST node
//! rebuilt from evaluating `expr` in the current environment.
//!
//! `unquote` is not a function: it is recognized purely syntactically
//! inside a `quote(...)` argument.

use mnk_lex::{Token, TokenKind};
use mnk_par::ast::{BooleanLiteral, CallExpression, Expression, IntegerLiteral, Node};
use mnk_par::modify;

use crate::env::Env;
use crate::evaluator;
use crate::object::Object;

/// Evaluates `quote(expr)`: splice `unquote` calls, then wrap the
/// resulting AST as a value.
pub fn quote(expr: &Expression, env: &Env) -> Object {
    let node = eval_unquote_calls(Node::Expression(expr.clone()), env);
    Object::Quote(node)
}

fn eval_unquote_calls(quoted: Node, env: &Env) -> Node {
    modify(quoted, &mut |node| {
        let Node::Expression(Expression::Call(call)) = &node else {
            return node;
        };
        if !is_unquote_call(call) {
            return node;
        }

        let Node::Expression(Expression::Call(call)) = node else {
            unreachable!("checked above");
        };
        let value = evaluator::eval_expression(&call.arguments[0], env);
        convert_object_to_node(value)
    })
}

fn is_unquote_call(call: &CallExpression) -> bool {
    matches!(call.function.as_ref(),
        Expression::Identifier(ident) if ident.value == "unquote")
        && call.arguments.len() == 1
}

/// Rebuilds an AST node from an evaluated value.
///
/// Only integers, booleans, and quoted nodes have a defined
/// reconstruction; anything else is an internal error and halts.
fn convert_object_to_node(object: Object) -> Node {
    match object {
        Object::Integer(value) => {
            let token = Token::new(TokenKind::Int, value.to_string());
            Node::Expression(Expression::Integer(IntegerLiteral { token, value }))
        }
        Object::Boolean(value) => {
            let token = if value {
                Token::new(TokenKind::True, "true")
            } else {
                Token::new(TokenKind::False, "false")
            };
            Node::Expression(Expression::Boolean(BooleanLiteral { token, value }))
        }
        Object::Quote(node) => node,
        other => panic!("cannot convert {} into an AST node", other.type_tag()),
    }
}
