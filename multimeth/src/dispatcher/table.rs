//! The method table of a single dispatcher.

use multimeth_core::{ClassKey, Method, Selector};
use std::{collections::HashMap, sync::Arc};

/// A shared, type-erased method.
pub(crate) type SharedMethod<A, R> = Arc<dyn Method<A, R>>;

/// Exact-match table from classification value to method, plus the
/// optional default.
pub(crate) struct MethodTable<A, R> {
    methods: HashMap<ClassKey, SharedMethod<A, R>>,
    default: Option<SharedMethod<A, R>>,
}

impl<A, R> MethodTable<A, R> {
    pub(crate) fn new() -> Self {
        Self {
            methods: HashMap::new(),
            default: None,
        }
    }

    /// Find the method for `key`, falling back to the default.
    pub(crate) fn resolve(&self, key: &ClassKey) -> Option<SharedMethod<A, R>> {
        self.methods
            .get(key)
            .or(self.default.as_ref())
            .cloned()
    }

    /// Store `method` under `selector`, returning the method it replaces.
    pub(crate) fn insert(
        &mut self,
        selector: Selector,
        method: SharedMethod<A, R>,
    ) -> Option<SharedMethod<A, R>> {
        match selector {
            Selector::Default => self.default.replace(method),
            Selector::Key(key) => self.methods.insert(key, method),
        }
    }

    pub(crate) fn remove(&mut self, selector: &Selector) -> Option<SharedMethod<A, R>> {
        match selector {
            Selector::Default => self.default.take(),
            Selector::Key(key) => self.methods.remove(key),
        }
    }

    pub(crate) fn contains(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Default => self.default.is_some(),
            Selector::Key(key) => self.methods.contains_key(key),
        }
    }

    pub(crate) fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Number of keyed methods; the default is not counted.
    pub(crate) fn len(&self) -> usize {
        self.methods.len()
    }

    pub(crate) fn keys(&self) -> Vec<ClassKey> {
        self.methods.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{MethodTable, SharedMethod};
    use multimeth_core::{BoxError, ClassKey, DEFAULT, Selector};
    use std::sync::Arc;

    fn constant(value: &'static str) -> SharedMethod<(), &'static str> {
        Arc::new(move |(): ()| -> Result<&'static str, BoxError> { Ok(value) })
    }

    fn resolved(table: &MethodTable<(), &'static str>, key: &ClassKey) -> Option<&'static str> {
        table.resolve(key).map(|m| m.call(()).unwrap())
    }

    #[test]
    fn test_exact_match_before_default() {
        let mut table = MethodTable::new();
        table.insert(Selector::key("circle"), constant("round"));
        table.insert(DEFAULT, constant("unknown"));

        assert_eq!(resolved(&table, &ClassKey::from("circle")), Some("round"));
        assert_eq!(resolved(&table, &ClassKey::from("Circle")), Some("unknown"));
        assert_eq!(table.len(), 1);
        assert!(table.has_default());
    }

    #[test]
    fn test_no_default_no_match() {
        let mut table = MethodTable::new();
        table.insert(Selector::key("circle"), constant("round"));
        assert_eq!(resolved(&table, &ClassKey::from("square")), None);
    }

    #[test]
    fn test_insert_replaces_and_remove_clears() {
        let mut table = MethodTable::new();
        assert!(table.insert(Selector::key(1i32), constant("first")).is_none());
        assert!(table.insert(Selector::key(1i32), constant("second")).is_some());
        assert_eq!(resolved(&table, &ClassKey::Int(1)), Some("second"));

        assert!(table.remove(&DEFAULT).is_none());
        assert!(table.remove(&Selector::key(1i32)).is_some());
        assert!(!table.contains(&Selector::key(1i32)));
        assert!(table.keys().is_empty());
    }
}
