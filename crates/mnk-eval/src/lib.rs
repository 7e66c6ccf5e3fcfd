//! mnk-eval - Evaluator for the Monkey language.
//!
//! The back half of the interpreter: runtime values ([`object`]),
//! lexically-scoped environments ([`env`]), the recursive AST walker
//! ([`evaluator`]), the builtin registry ([`builtins`]), and the
//! source-transforming macro pipeline ([`macros`] and [`quote`]).
//!
//! The intended pipeline, per program:
//!
//! ```
//! use mnk_eval::{define_macros, eval_program, expand_macros, Environment};
//!
//! let mut program = mnk_par::parse("let double = macro(x) { quote(unquote(x) * 2); }; double(21);").unwrap();
//!
//! let env = Environment::new();
//! let macro_env = Environment::new();
//!
//! define_macros(&mut program, &macro_env);
//! let expanded = expand_macros(program, &macro_env);
//!
//! assert_eq!(eval_program(&expanded, &env).inspect(), "42");
//! ```

pub mod builtins;
pub mod env;
pub mod evaluator;
pub mod macros;
pub mod object;
pub mod quote;

pub use env::{Env, Environment};
pub use evaluator::{eval, eval_program, FALSE, NULL, TRUE};
pub use macros::{define_macros, expand_macros};
pub use object::{
    Builtin, BuiltinFn, Function, HashKey, HashObject, HashPair, MacroObject, Object,
};
