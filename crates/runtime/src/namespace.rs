use std::{any::Any, collections::HashMap, fmt, sync::Arc};

/// Value held by a global binding. Type identity is recovered at the use
/// site via downcast.
pub type BindingValue = Arc<dyn Any + Send + Sync>;

/// The global bindings a loaded module exports, keyed by name.
#[derive(Default)]
pub struct Namespace {
    bindings: HashMap<String, Var>,
}

impl Namespace {
    /// Publishes `value` under `name`, replacing any previous binding.
    pub fn define<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.define_value(name, Arc::new(value));
    }

    pub fn define_value(&mut self, name: impl Into<String>, value: BindingValue) {
        self.bindings.insert(name.into(), Var::new(value));
    }

    pub(crate) fn var(&self, name: &str) -> Option<Var> {
        self.bindings.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.bindings.keys().map(|name| (name, "..")))
            .finish()
    }
}

/// A dereferenceable cell for one global binding.
#[derive(Clone)]
pub struct Var {
    cell: BindingValue,
}

impl Var {
    fn new(cell: BindingValue) -> Self {
        Self { cell }
    }

    /// Dereferences the cell, yielding a shared handle to the bound value.
    pub fn deref(&self) -> BindingValue {
        Arc::clone(&self.cell)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_lookup_round_trips() {
        let mut namespace = Namespace::default();
        namespace.define("answer", 42u32);

        let var = namespace.var("answer").expect("binding should exist");

        assert_eq!(var.deref().downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn redefining_replaces_the_binding() {
        let mut namespace = Namespace::default();
        namespace.define("answer", 1u32);
        namespace.define("answer", 2u32);

        let var = namespace.var("answer").expect("binding should exist");

        assert_eq!(var.deref().downcast_ref::<u32>(), Some(&2));
    }

    #[test]
    fn missing_binding_is_none() {
        let namespace = Namespace::default();

        assert!(namespace.var("absent").is_none());
    }
}
