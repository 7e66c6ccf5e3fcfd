//! Runtime values for the Monkey evaluator.
//!
//! [`Object`] is the closed set of values a program can produce. Each
//! variant has a stable `type_tag()` used in error messages and an
//! `inspect()` rendering used by `puts` and the drivers.
//!
//! `ReturnValue` and `Error` are sentinels: they exist only to steer
//! evaluation (unwinding out of blocks, short-circuiting compositions)
//! and `ReturnValue` is never visible outside the evaluator.

use std::fmt;

use indexmap::IndexMap;
use mnk_par::ast::{BlockStatement, Identifier, Node};

use crate::env::Env;

/// A Monkey runtime value.
#[derive(Clone, Debug)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Null,
    Array(Vec<Object>),
    Hash(HashObject),
    Function(Function),
    Builtin(Builtin),
    /// Transient wrapper carrying a `return`ed value up to the nearest
    /// function or program boundary.
    ReturnValue(Box<Object>),
    /// Evaluation error. Short-circuits every enclosing composition and
    /// becomes the top-level result. Never wrapped in `ReturnValue`.
    Error(String),
    /// An AST fragment reified as a value by `quote(...)`.
    Quote(Node),
    Macro(MacroObject),
}

impl Object {
    /// Stable type name used in error messages.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Quote(_) => "QUOTE",
            Object::Macro(_) => "MACRO",
        }
    }

    /// User-facing rendering of the value.
    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(value) => value.to_string(),
            Object::Boolean(value) => value.to_string(),
            Object::Str(value) => value.clone(),
            Object::Null => "null".to_string(),
            Object::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(Object::inspect).collect();
                format!("[{}]", rendered.join(", "))
            }
            Object::Hash(hash) => {
                let rendered: Vec<String> = hash
                    .pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key.inspect(), pair.value.inspect()))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            Object::Function(func) => {
                format!(
                    "fn({}) {{\n{}\n}}",
                    join_parameters(&func.parameters),
                    func.body
                )
            }
            Object::Builtin(_) => "builtin function".to_string(),
            Object::ReturnValue(value) => value.inspect(),
            Object::Error(message) => format!("ERROR: {}", message),
            Object::Quote(node) => format!("QUOTE({})", node),
            Object::Macro(mac) => {
                format!(
                    "macro({}) {{\n{}\n}}",
                    join_parameters(&mac.parameters),
                    mac.body
                )
            }
        }
    }

    /// The canonical hash key for this value, if it is hashable.
    ///
    /// Only `Integer`, `Boolean`, and `Str` values can be used as hash
    /// keys; everything else returns `None` and the evaluator reports
    /// `unusable as hash key`.
    pub fn hash_key(&self) -> Option<HashKey> {
        let bits = match self {
            Object::Integer(value) => *value as u64,
            Object::Boolean(value) => u64::from(*value),
            Object::Str(value) => fnv1a(value.as_bytes()),
            _ => return None,
        };

        Some(HashKey {
            kind: self.type_tag(),
            bits,
        })
    }
}

fn join_parameters(parameters: &[Identifier]) -> String {
    parameters
        .iter()
        .map(|param| param.value.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The canonical map key for hashable values: the value's type tag plus
/// a 64-bit fingerprint (the value itself for integers, 0/1 for
/// booleans, FNV-1a over the bytes for strings).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: &'static str,
    pub bits: u64,
}

/// 64-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// A hash value. Pairs keep their first-insertion order so `inspect`
/// output is deterministic.
#[derive(Clone, Debug, Default)]
pub struct HashObject {
    pub pairs: IndexMap<HashKey, HashPair>,
}

/// One key/value pair of a hash, keeping the original key object around
/// for `inspect`.
#[derive(Clone, Debug)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// A function value: parameters, body, and the environment captured at
/// definition time (by reference, so the closure sees its defining
/// scope).
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

// The captured environment can transitively contain this function, so
// Debug must not recurse into it.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

/// A macro value, structurally a function but consumed by the expansion
/// pass instead of the evaluator.
#[derive(Clone)]
pub struct MacroObject {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

impl fmt::Debug for MacroObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Macro")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

/// Signature of a native builtin function.
pub type BuiltinFn = fn(Vec<Object>) -> Object;

/// A builtin bound into the global registry.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}
