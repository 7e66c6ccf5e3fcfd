//! The macro expansion pass.
//!
//! Runs before evaluation. [`define_macros`] pulls top-level
//! `let <name> = macro(...) {...};` statements out of the program and
//! binds them in a dedicated macro environment; [`expand_macros`] then
//! rewrites every call to a defined macro by evaluating the macro body
//! with the *unevaluated* argument ASTs bound as `Quote` values, and
//! splicing the resulting quoted node into the call site.
//!
//! The evaluator never sees macro values in normal call positions.

use mnk_par::ast::{Expression, MacroLiteral, Node, Program, Statement};
use mnk_par::modify;

use crate::env::{Env, Environment};
use crate::evaluator;
use crate::object::{MacroObject, Object};

/// Extracts top-level macro definitions from `program` into `env`,
/// removing them from the statement list (remaining statements keep
/// their order).
///
/// Only statements of the shape `let <name> = macro(...) {...};` at the
/// top level count as macro definitions.
pub fn define_macros(program: &mut Program, env: &Env) {
    program.statements.retain(|stmt| {
        let Some((name, literal)) = as_macro_definition(stmt) else {
            return true;
        };

        let macro_obj = MacroObject {
            parameters: literal.parameters.clone(),
            body: literal.body.clone(),
            env: env.clone(),
        };
        env.borrow_mut().set(name.to_string(), Object::Macro(macro_obj));
        false
    });
}

fn as_macro_definition(stmt: &Statement) -> Option<(&str, &MacroLiteral)> {
    let Statement::Let(let_stmt) = stmt else {
        return None;
    };
    let Expression::Macro(literal) = &let_stmt.value else {
        return None;
    };
    Some((&let_stmt.name.value, literal))
}

/// Expands every macro call in `program` and returns the rewritten
/// program.
///
/// A macro body must evaluate to a `Quote`; anything else is an
/// internal error and halts.
pub fn expand_macros(program: Program, env: &Env) -> Program {
    let node = modify(Node::Program(program), &mut |node| {
        let Node::Expression(Expression::Call(call)) = &node else {
            return node;
        };
        let Some(macro_obj) = as_macro_call(call, env) else {
            return node;
        };

        let Node::Expression(Expression::Call(call)) = node else {
            unreachable!("checked above");
        };

        assert_eq!(
            call.arguments.len(),
            macro_obj.parameters.len(),
            "macro called with wrong number of arguments. want={}, got={}",
            macro_obj.parameters.len(),
            call.arguments.len()
        );

        // Arguments reach the macro body as unevaluated, quoted ASTs.
        let eval_env = Environment::enclosed(macro_obj.env.clone());
        for (param, arg) in macro_obj.parameters.iter().zip(call.arguments) {
            eval_env
                .borrow_mut()
                .set(param.value.clone(), Object::Quote(Node::Expression(arg)));
        }

        match evaluator::eval_block(&macro_obj.body, &eval_env) {
            Object::Quote(node) => node,
            other => panic!(
                "macros must return a quoted AST node, got {}",
                other.type_tag()
            ),
        }
    });

    match node {
        Node::Program(program) => program,
        _ => panic!("macro expansion replaced the program root"),
    }
}

fn as_macro_call(call: &mnk_par::ast::CallExpression, env: &Env) -> Option<MacroObject> {
    let Expression::Identifier(ident) = call.function.as_ref() else {
        return None;
    };

    match env.borrow().get(&ident.value) {
        Some(Object::Macro(macro_obj)) => Some(macro_obj),
        _ => None,
    }
}
