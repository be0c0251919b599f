//! # Dispatcher
//!
//! A [`Dispatcher`] is one multimethod: a name, a dispatch function, and a
//! table from classification value to method with an optional default.
//!
//! # Resolution
//!
//! [`Dispatcher::invoke`] runs on every call:
//!
//! 1. The dispatch function classifies the arguments into a [`ClassKey`].
//!    If it fails, its error is returned as is.
//! 2. The key is looked up by exact equality.
//! 3. The matched method, or else the default, is called with the original
//!    arguments and its result is returned.
//! 4. With neither, the call fails with [`DispatchError::NoMatchingMethod`].
//!
//! The table is read-locked only for the lookup, so methods may call back
//! into the dispatcher that selected them.

mod builder;
mod table;

pub use builder::{DispatcherBuilder, RedefinitionPolicy};

use crate::registry::Registry;
use multimeth_core::{
    BindError, BoxError, ClassKey, Classifier, DispatchError, Method, RegistryError, Selector,
};
use parking_lot::RwLock;
use std::{fmt, sync::Arc};
use table::{MethodTable, SharedMethod};

struct Shared<A, R> {
    name: String,
    redefinition: RedefinitionPolicy,
    classifier: Box<dyn Classifier<A>>,
    table: RwLock<MethodTable<A, R>>,
}

/// A handle to a multimethod taking the argument tuple `A` and returning `R`.
///
/// Handles are cheap to clone; every clone shares the same method table.
///
/// # Example
/// ```ignore
/// let area: Dispatcher<(Shape,), f64> =
///     Dispatcher::create("area", |(shape,): &(Shape,)| Ok(shape.kind()))?;
/// area.bind("square", |(shape,): (Shape,)| Ok(shape.side * shape.side))?;
/// area.bind(DEFAULT, |_| Ok(0.0))?;
///
/// assert_eq!(area.invoke((Shape::square(2.0),))?, 4.0);
/// ```
pub struct Dispatcher<A, R> {
    inner: Arc<Shared<A, R>>,
}

impl<A: 'static, R: 'static> Dispatcher<A, R> {
    /// Create a dispatcher and register it in the global registry.
    ///
    /// Fails with [`RegistryError::DuplicateName`] if `name` is taken.
    pub fn create<F, K>(name: impl Into<String>, dispatch_fn: F) -> Result<Self, RegistryError>
    where
        F: Fn(&A) -> Result<K, BoxError> + Send + Sync + 'static,
        K: Into<ClassKey>,
    {
        DispatcherBuilder::new(name).create(dispatch_fn)
    }

    /// Create a dispatcher and register it in `registry`.
    pub fn create_in<F, K>(
        registry: &Registry,
        name: impl Into<String>,
        dispatch_fn: F,
    ) -> Result<Self, RegistryError>
    where
        F: Fn(&A) -> Result<K, BoxError> + Send + Sync + 'static,
        K: Into<ClassKey>,
    {
        DispatcherBuilder::new(name).create_in(registry, dispatch_fn)
    }

    pub(crate) fn unregistered(
        name: String,
        redefinition: RedefinitionPolicy,
        classifier: Box<dyn Classifier<A>>,
    ) -> Self {
        Self {
            inner: Arc::new(Shared {
                name,
                redefinition,
                classifier,
                table: RwLock::new(MethodTable::new()),
            }),
        }
    }

    /// The name this dispatcher is registered under.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The redefinition policy chosen at construction.
    pub fn redefinition_policy(&self) -> RedefinitionPolicy {
        self.inner.redefinition
    }

    /// Bind a closure or function as the method for `selector`.
    ///
    /// Binding [`DEFAULT`](multimeth_core::DEFAULT) installs the fallback.
    /// Under [`RedefinitionPolicy::Replace`] an existing method is replaced
    /// and this never fails.
    pub fn bind<F>(&self, selector: impl Into<Selector>, handler: F) -> Result<(), BindError>
    where
        F: Fn(A) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        self.bind_method(selector, handler)
    }

    /// Bind any [`Method`] implementation for `selector`.
    pub fn bind_method<M>(&self, selector: impl Into<Selector>, method: M) -> Result<(), BindError>
    where
        M: Method<A, R>,
    {
        self.bind_shared(selector.into(), Arc::new(method))
    }

    pub(crate) fn bind_shared(
        &self,
        selector: Selector,
        method: SharedMethod<A, R>,
    ) -> Result<(), BindError> {
        let mut table = self.inner.table.write();
        if self.inner.redefinition == RedefinitionPolicy::Reject && table.contains(&selector) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                dispatcher = %self.inner.name,
                selector = %selector,
                "refusing to redefine method"
            );
            return Err(BindError::Redefinition {
                dispatcher: self.inner.name.clone(),
                selector,
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            dispatcher = %self.inner.name,
            selector = %selector,
            replaced = table.contains(&selector),
            "bound method"
        );
        table.insert(selector, method);
        Ok(())
    }

    /// Remove the method bound under `selector`, returning whether one was
    /// bound.
    pub fn unbind(&self, selector: impl Into<Selector>) -> bool {
        let selector = selector.into();
        let removed = self.inner.table.write().remove(&selector).is_some();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            dispatcher = %self.inner.name,
            selector = %selector,
            removed,
            "unbound method"
        );
        removed
    }

    /// Run only the dispatch function.
    pub fn classify(&self, args: &A) -> Result<ClassKey, DispatchError> {
        self.inner
            .classifier
            .classify(args)
            .map_err(DispatchError::Failed)
    }

    /// Call the multimethod.
    ///
    /// The selected method receives `args` exactly as passed here.
    pub fn invoke(&self, args: A) -> Result<R, DispatchError> {
        let key = self.classify(&args)?;
        let resolved = self.inner.table.read().resolve(&key);

        let Some(method) = resolved else {
            #[cfg(feature = "tracing")]
            tracing::debug!(dispatcher = %self.inner.name, key = %key, "no matching method");
            return Err(DispatchError::NoMatchingMethod {
                dispatcher: self.inner.name.clone(),
                key,
            });
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(dispatcher = %self.inner.name, key = %key, "dispatching");
        method.call(args).map_err(|source| DispatchError::Method {
            dispatcher: self.inner.name.clone(),
            key,
            source,
        })
    }

    /// Check if a method is bound under `selector`.
    pub fn has_method(&self, selector: impl Into<Selector>) -> bool {
        self.inner.table.read().contains(&selector.into())
    }

    /// Check if a default method is bound.
    pub fn has_default(&self) -> bool {
        self.inner.table.read().has_default()
    }

    /// Get the number of keyed methods, not counting the default.
    pub fn len(&self) -> usize {
        self.inner.table.read().len()
    }

    /// Check if no keyed method is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The keys that currently have a method, in no particular order.
    pub fn keys(&self) -> Vec<ClassKey> {
        self.inner.table.read().keys()
    }
}

impl<A, R> Clone for Dispatcher<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R> fmt::Debug for Dispatcher<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.inner.table.read();
        f.debug_struct("Dispatcher")
            .field("name", &self.inner.name)
            .field("redefinition", &self.inner.redefinition)
            .field("methods", &table.len())
            .field("default", &table.has_default())
            .finish()
    }
}
