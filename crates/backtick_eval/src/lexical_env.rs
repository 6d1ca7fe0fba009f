use ecow::EcoString;
use rustc_hash::FxHashMap;

use crate::{builtins, value::Value};

/// A frame of name bindings, chained to the frames that enclose it.
///
/// Lookup walks from the innermost frame outwards to the global frame, and
/// falls back to the builtins last. Child frames borrow their parent, so an
/// inner scope can never outlive the scopes it reads from.
#[derive(Debug, Default)]
pub struct Scope<'p> {
    bindings: FxHashMap<EcoString, Value>,
    parent: Option<&'p Scope<'p>>,
}

impl Scope<'static> {
    /// Creates an empty global scope.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'p> Scope<'p> {
    /// Creates an empty scope enclosed by `self`.
    pub fn child<'c>(&'c self) -> Scope<'c> {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(self),
        }
    }

    /// Binds `name` in this frame, shadowing any outer binding. Returns the
    /// previous value bound in this frame.
    pub fn declare(&mut self, name: impl Into<EcoString>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    /// Builder-style [`Scope::declare`].
    pub fn with(mut self, name: impl Into<EcoString>, value: Value) -> Self {
        self.declare(name, value);
        self
    }

    /// Looks `name` up in this frame and its enclosing frames.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let mut scope = Some(self);
        while let Some(cur) = scope {
            if let Some(value) = cur.bindings.get(name) {
                return Some(value);
            }
            scope = cur.parent;
        }
        None
    }

    /// Like [`Scope::get`], but also consults the builtins.
    pub fn resolve(&self, name: &str) -> Option<Value> {
        self.get(name)
            .cloned()
            .or_else(|| builtins::lookup(name))
    }

    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of enclosing frames.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.parent;
        while let Some(cur) = scope {
            depth += 1;
            scope = cur.parent;
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outwards() {
        let global = Scope::new()
            .with("x", Value::Num(1.0))
            .with("y", Value::Num(2.0));
        let mut enclosing = global.child();
        enclosing.declare("y", Value::Num(20.0));
        let mut local = enclosing.child();
        local.declare("z", Value::Num(300.0));

        assert_eq!(local.get("x"), Some(&Value::Num(1.0)));
        assert_eq!(local.get("y"), Some(&Value::Num(20.0)));
        assert_eq!(local.get("z"), Some(&Value::Num(300.0)));
        assert_eq!(enclosing.get("z"), None);
        assert_eq!(local.depth(), 2);
        assert!(global.is_global());
    }

    #[test]
    fn builtins_come_last() {
        let global = Scope::new();
        assert!(matches!(global.resolve("len"), Some(Value::Function(_))));

        let shadowed = Scope::new().with("len", Value::Num(3.0));
        assert_eq!(shadowed.resolve("len"), Some(Value::Num(3.0)));
        assert_eq!(shadowed.resolve("nope"), None);
    }
}
