//! Registry module for dispatcher lookup by name.
//!
//! A [`Registry`] maps dispatcher names to live [`Dispatcher`] handles. It is
//! populated when a dispatcher is created and consulted by the
//! [`Binder`](crate::Binder) to resolve a name before a method is attached.
//! Entries are never removed, and a name can be registered only once.
//!
//! The process-wide instance is reached through [`Registry::global`] and is
//! initialized on first use. Independent registries can be created with
//! [`Registry::new`], which is mostly useful for isolating tests.

use crate::dispatcher::Dispatcher;
use multimeth_core::RegistryError;
use parking_lot::RwLock;
use std::{
    any::{Any, type_name},
    collections::{HashMap, hash_map},
    fmt,
    sync::{Arc, LazyLock},
};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// A type-erased dispatcher handle with the name of its concrete type.
struct RegistryEntry {
    handle: Arc<dyn Any + Send + Sync>,
    signature: &'static str,
}

/// A name-keyed collection of dispatchers.
pub struct Registry {
    entries: RwLock<HashMap<String, RegistryEntry>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register a dispatcher under its own name.
    ///
    /// Fails with [`RegistryError::DuplicateName`] if the name is taken; the
    /// existing dispatcher and its methods are left untouched.
    pub fn register<A, R>(&self, dispatcher: &Dispatcher<A, R>) -> Result<(), RegistryError>
    where
        A: 'static,
        R: 'static,
    {
        let mut entries = self.entries.write();
        match entries.entry(dispatcher.name().to_string()) {
            hash_map::Entry::Occupied(slot) => {
                Err(RegistryError::DuplicateName(slot.key().clone()))
            }
            hash_map::Entry::Vacant(slot) => {
                slot.insert(RegistryEntry {
                    handle: Arc::new(dispatcher.clone()),
                    signature: type_name::<Dispatcher<A, R>>(),
                });
                #[cfg(feature = "tracing")]
                tracing::debug!(dispatcher = %dispatcher.name(), "registered dispatcher");
                Ok(())
            }
        }
    }

    /// Look up the dispatcher registered under `name`.
    ///
    /// The argument and result types must match the ones the dispatcher was
    /// created with, otherwise [`RegistryError::SignatureMismatch`] is
    /// returned.
    pub fn lookup<A, R>(&self, name: &str) -> Result<Dispatcher<A, R>, RegistryError>
    where
        A: 'static,
        R: 'static,
    {
        let entries = self.entries.read();
        let entry = entries
            .get(name)
            .ok_or_else(|| RegistryError::UnknownDispatcher(name.to_string()))?;

        entry
            .handle
            .downcast_ref::<Dispatcher<A, R>>()
            .cloned()
            .ok_or_else(|| RegistryError::SignatureMismatch {
                name: name.to_string(),
                expected: type_name::<Dispatcher<A, R>>(),
                found: entry.signature,
            })
    }

    /// Check if a dispatcher is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Get the number of registered dispatchers.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Names of all registered dispatchers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("dispatchers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::Dispatcher;
    use multimeth_core::{BoxError, RegistryError};

    fn by_sign(args: &(i64,)) -> Result<&'static str, BoxError> {
        Ok(if args.0 < 0 { "negative" } else { "non-negative" })
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = Registry::new();
        let abs: Dispatcher<(i64,), i64> =
            Dispatcher::create_in(&registry, "abs", by_sign).unwrap();
        abs.bind("negative", |(x,): (i64,)| Ok(-x)).unwrap();

        let found = registry.lookup::<(i64,), i64>("abs").unwrap();
        assert_eq!(found.invoke((-4,)).unwrap(), 4);
        assert!(registry.contains("abs"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["abs".to_string()]);
    }

    #[test]
    fn test_unknown_name() {
        let registry = Registry::new();
        let result = registry.lookup::<(i64,), i64>("missing");
        assert_eq!(
            result.unwrap_err(),
            RegistryError::UnknownDispatcher("missing".to_string())
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_signature_mismatch() {
        let registry = Registry::new();
        let _abs: Dispatcher<(i64,), i64> =
            Dispatcher::create_in(&registry, "abs", by_sign).unwrap();

        let result = registry.lookup::<(i64,), String>("abs");
        assert!(matches!(
            result,
            Err(RegistryError::SignatureMismatch { ref name, .. }) if name == "abs"
        ));
    }

    #[test]
    fn test_registries_are_isolated() {
        let first = Registry::new();
        let second = Registry::new();
        let _a: Dispatcher<(i64,), i64> = Dispatcher::create_in(&first, "abs", by_sign).unwrap();
        let _b: Dispatcher<(i64,), i64> = Dispatcher::create_in(&second, "abs", by_sign).unwrap();
        assert!(first.contains("abs") && second.contains("abs"));
    }
}
