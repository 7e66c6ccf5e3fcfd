//! Lexically-scoped environments.
//!
//! An [`Environment`] is a frame mapping names to values, chained to an
//! optional outer frame. Frames are shared by reference: a closure holds
//! the same `Env` handle as the scope it was defined in, so bindings
//! added to that scope stay visible to the closure.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::object::Object;

/// Shared handle to an environment frame.
pub type Env = Rc<RefCell<Environment>>;

/// One scope frame.
#[derive(Debug, Default)]
pub struct Environment {
    store: FxHashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    /// Creates a fresh top-level environment.
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Creates a frame whose lookups fall through to `outer`.
    pub fn enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: FxHashMap::default(),
            outer: Some(outer),
        }))
    }

    /// Looks up `name`, walking the outer chain.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .outer
                .as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds `name` in this frame only. Shadows, never mutates, any
    /// binding of the same name in an outer frame.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.store.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let env = Environment::new();
        env.borrow_mut().set("a", Object::Integer(1));

        assert!(matches!(env.borrow().get("a"), Some(Object::Integer(1))));
        assert!(env.borrow().get("b").is_none());
    }

    #[test]
    fn test_get_walks_outer_chain() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Object::Integer(1));

        let inner = Environment::enclosed(outer.clone());
        let innermost = Environment::enclosed(inner);

        assert!(matches!(
            innermost.borrow().get("a"),
            Some(Object::Integer(1))
        ));
    }

    #[test]
    fn test_set_shadows_without_mutating_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Object::Integer(1));

        let inner = Environment::enclosed(outer.clone());
        inner.borrow_mut().set("a", Object::Integer(2));

        assert!(matches!(inner.borrow().get("a"), Some(Object::Integer(2))));
        assert!(matches!(outer.borrow().get("a"), Some(Object::Integer(1))));
    }

    #[test]
    fn test_outer_bindings_added_later_are_visible() {
        let outer = Environment::new();
        let inner = Environment::enclosed(outer.clone());

        outer.borrow_mut().set("late", Object::Integer(9));
        assert!(matches!(
            inner.borrow().get("late"),
            Some(Object::Integer(9))
        ));
    }
}
