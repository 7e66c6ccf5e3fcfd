//! The tree-walking evaluator.
//!
//! `eval` dispatches on AST variants and threads two sentinels through
//! every composition: `ReturnValue` unwinds out of nested blocks up to
//! the nearest function or program boundary, and `Error` short-circuits
//! everything. Every step checks its sub-results before looking at the
//! next operand, statement, or argument.

use indexmap::IndexMap;

use mnk_par::ast::{
    BlockStatement, CallExpression, Expression, HashLiteral, IfExpression, Node, Program,
    Statement, WhileStatement,
};

use crate::builtins;
use crate::env::{Env, Environment};
use crate::object::{Function, HashObject, HashPair, Object};
use crate::quote;

/// The interned `true` value.
pub const TRUE: Object = Object::Boolean(true);
/// The interned `false` value.
pub const FALSE: Object = Object::Boolean(false);
/// The interned null value.
pub const NULL: Object = Object::Null;

/// Evaluates any AST node in the given environment.
pub fn eval(node: &Node, env: &Env) -> Object {
    match node {
        Node::Program(program) => eval_program(program, env),
        Node::Statement(stmt) => eval_statement(stmt, env),
        Node::Expression(expr) => eval_expression(expr, env),
    }
}

/// Evaluates a program: statements in order, unwrapping a `ReturnValue`
/// and stopping at the first `Error`.
pub fn eval_program(program: &Program, env: &Env) -> Object {
    let mut result = NULL;

    for stmt in &program.statements {
        match eval_statement(stmt, env) {
            Object::ReturnValue(value) => return *value,
            err @ Object::Error(_) => return err,
            object => result = object,
        }
    }

    result
}

/// Evaluates a block. Unlike a program, a `ReturnValue` is passed
/// through as-is so it keeps unwinding through enclosing blocks.
pub(crate) fn eval_block(block: &BlockStatement, env: &Env) -> Object {
    let mut result = NULL;

    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(stmt: &Statement, env: &Env) -> Object {
    match stmt {
        Statement::Expression(s) => eval_expression(&s.expression, env),
        Statement::Let(s) => {
            let value = eval_expression(&s.value, env);
            if is_error(&value) {
                return value;
            }
            env.borrow_mut().set(s.name.value.clone(), value);
            NULL
        }
        Statement::Return(s) => {
            let value = eval_expression(&s.return_value, env);
            if is_error(&value) {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Block(s) => eval_block(s, env),
        Statement::While(s) => eval_while_statement(s, env),
    }
}

fn eval_while_statement(stmt: &WhileStatement, env: &Env) -> Object {
    loop {
        let condition = eval_expression(&stmt.condition, env);
        if is_error(&condition) {
            return condition;
        }
        if !is_truthy(&condition) {
            return NULL;
        }

        let result = eval_block(&stmt.body, env);
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
}

pub(crate) fn eval_expression(expr: &Expression, env: &Env) -> Object {
    match expr {
        Expression::Integer(lit) => Object::Integer(lit.value),
        Expression::Str(lit) => Object::Str(lit.value.clone()),
        Expression::Boolean(lit) => bool_object(lit.value),
        Expression::Identifier(ident) => match env.borrow().get(&ident.value) {
            Some(value) => value,
            None => builtins::lookup(&ident.value).unwrap_or_else(|| {
                Object::Error(format!("identifier not found: {}", ident.value))
            }),
        },
        Expression::Prefix(e) => {
            let right = eval_expression(&e.right, env);
            if is_error(&right) {
                return right;
            }
            eval_prefix_expression(&e.operator, right)
        }
        Expression::Infix(e) => {
            let left = eval_expression(&e.left, env);
            if is_error(&left) {
                return left;
            }
            let right = eval_expression(&e.right, env);
            if is_error(&right) {
                return right;
            }
            eval_infix_expression(&e.operator, left, right)
        }
        Expression::If(e) => eval_if_expression(e, env),
        Expression::Function(lit) => Object::Function(Function {
            parameters: lit.parameters.clone(),
            body: lit.body.clone(),
            env: env.clone(),
        }),
        Expression::Call(call) => eval_call_expression(call, env),
        Expression::Array(lit) => {
            let mut elements = eval_expressions(&lit.elements, env);
            if elements.len() == 1 && is_error(&elements[0]) {
                return elements.remove(0);
            }
            Object::Array(elements)
        }
        Expression::Index(e) => {
            let left = eval_expression(&e.left, env);
            if is_error(&left) {
                return left;
            }
            let index = eval_expression(&e.index, env);
            if is_error(&index) {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::Hash(lit) => eval_hash_literal(lit, env),
        // A macro literal that survived macro definition extraction has
        // no runtime value.
        Expression::Macro(_) => NULL,
    }
}

// ============================================================================
// OPERATORS
// ============================================================================

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => eval_bang_operator(right),
        "-" => match right {
            Object::Integer(value) => Object::Integer(-value),
            other => Object::Error(format!("unknown operator: -{}", other.type_tag())),
        },
        _ => Object::Error(format!("unknown operator: {}{}", operator, right.type_tag())),
    }
}

fn eval_bang_operator(right: Object) -> Object {
    if is_truthy(&right) {
        FALSE
    } else {
        TRUE
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, l, r),
        (Object::Str(l), Object::Str(r)) => eval_string_infix(operator, l, r),
        (left, right) if left.type_tag() != right.type_tag() => Object::Error(format!(
            "type mismatch: {} {} {}",
            left.type_tag(),
            operator,
            right.type_tag()
        )),
        (left, right) => match operator {
            "==" => bool_object(objects_equal(&left, &right)),
            "!=" => bool_object(!objects_equal(&left, &right)),
            _ => Object::Error(format!(
                "unknown operator: {} {} {}",
                left.type_tag(),
                operator,
                right.type_tag()
            )),
        },
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => {
            if right == 0 {
                Object::Error("division by zero".to_string())
            } else {
                Object::Integer(left / right)
            }
        }
        "%" => {
            if right == 0 {
                Object::Error("division by zero".to_string())
            } else {
                Object::Integer(left % right)
            }
        }
        "<" => bool_object(left < right),
        ">" => bool_object(left > right),
        "==" => bool_object(left == right),
        "!=" => bool_object(left != right),
        _ => Object::Error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn eval_string_infix(operator: &str, left: String, right: String) -> Object {
    if operator == "+" {
        Object::Str(left + &right)
    } else {
        Object::Error(format!("unknown operator: STRING {} STRING", operator))
    }
}

/// Structural equality for `==`/`!=` between same-typed operands.
/// Arrays compare element-wise, hashes as pair sets; functions and
/// builtins never compare equal.
fn objects_equal(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => l == r,
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Str(l), Object::Str(r)) => l == r,
        (Object::Null, Object::Null) => true,
        (Object::Array(l), Object::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r.iter()).all(|(a, b)| objects_equal(a, b))
        }
        (Object::Hash(l), Object::Hash(r)) => {
            l.pairs.len() == r.pairs.len()
                && l.pairs.iter().all(|(key, pair)| {
                    r.pairs
                        .get(key)
                        .is_some_and(|other| objects_equal(&pair.value, &other.value))
                })
        }
        _ => false,
    }
}

// ============================================================================
// COMPOUND FORMS
// ============================================================================

fn eval_if_expression(expr: &IfExpression, env: &Env) -> Object {
    let condition = eval_expression(&expr.condition, env);
    if is_error(&condition) {
        return condition;
    }

    if is_truthy(&condition) {
        eval_block(&expr.consequence, env)
    } else if let Some(alternative) = &expr.alternative {
        eval_block(alternative, env)
    } else {
        NULL
    }
}

fn eval_call_expression(call: &CallExpression, env: &Env) -> Object {
    // `quote` is not a function: its argument must reach us unevaluated.
    if let Expression::Identifier(ident) = call.function.as_ref() {
        if ident.value == "quote" {
            if call.arguments.len() != 1 {
                return Object::Error(format!(
                    "wrong number of arguments. want=1, got={}",
                    call.arguments.len()
                ));
            }
            return quote::quote(&call.arguments[0], env);
        }
    }

    let function = eval_expression(&call.function, env);
    if is_error(&function) {
        return function;
    }

    let mut args = eval_expressions(&call.arguments, env);
    if args.len() == 1 && is_error(&args[0]) {
        return args.remove(0);
    }

    apply_function(function, args)
}

/// Applies a function or builtin to already-evaluated arguments.
pub(crate) fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(func) => {
            if args.len() != func.parameters.len() {
                return Object::Error(format!(
                    "wrong number of arguments. want={}, got={}",
                    func.parameters.len(),
                    args.len()
                ));
            }

            let extended = Environment::enclosed(func.env.clone());
            for (param, arg) in func.parameters.iter().zip(args) {
                extended.borrow_mut().set(param.value.clone(), arg);
            }

            match eval_block(&func.body, &extended) {
                Object::ReturnValue(value) => *value,
                other => other,
            }
        }
        Object::Builtin(builtin) => (builtin.func)(args),
        other => Object::Error(format!("not a function: {}", other.type_tag())),
    }
}

/// Evaluates expressions left to right. On the first error, the result
/// is that single error alone and later expressions are not touched.
fn eval_expressions(exprs: &[Expression], env: &Env) -> Vec<Object> {
    let mut results = Vec::with_capacity(exprs.len());

    for expr in exprs {
        let value = eval_expression(expr, env);
        if is_error(&value) {
            return vec![value];
        }
        results.push(value);
    }

    results
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(i)) => {
            if i < 0 || i as usize >= elements.len() {
                NULL
            } else {
                elements[i as usize].clone()
            }
        }
        (Object::Hash(hash), index) => match index.hash_key() {
            Some(key) => hash
                .pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(NULL),
            None => Object::Error(format!("unusable as hash key: {}", index.type_tag())),
        },
        (left, _) => Object::Error(format!(
            "index operator not supported: {}",
            left.type_tag()
        )),
    }
}

fn eval_hash_literal(lit: &HashLiteral, env: &Env) -> Object {
    let mut pairs = IndexMap::new();

    for (key_expr, value_expr) in &lit.pairs {
        let key = eval_expression(key_expr, env);
        if is_error(&key) {
            return key;
        }

        let Some(hash_key) = key.hash_key() else {
            return Object::Error(format!("unusable as hash key: {}", key.type_tag()));
        };

        let value = eval_expression(value_expr, env);
        if is_error(&value) {
            return value;
        }

        pairs.insert(hash_key, HashPair { key, value });
    }

    Object::Hash(HashObject { pairs })
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Exactly null and false are falsy; everything else, including 0 and
/// empty collections, is truthy.
fn is_truthy(object: &Object) -> bool {
    !matches!(object, Object::Null | Object::Boolean(false))
}

pub(crate) fn is_error(object: &Object) -> bool {
    matches!(object, Object::Error(_))
}

fn bool_object(value: bool) -> Object {
    if value {
        TRUE
    } else {
        FALSE
    }
}
