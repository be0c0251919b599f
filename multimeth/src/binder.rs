//! # Binder
//!
//! The Binder attaches methods to dispatchers by *name*. It is deliberately
//! separate from dispatcher construction: methods may be declared in any
//! module, as long as the declaration runs after the target dispatcher
//! exists.
//!
//! A [`Binding`] is the transient record of one such declaration. It is
//! consumed as soon as it is applied.

use crate::registry::Registry;
use multimeth_core::{BoxError, Method, MultimethodError, Selector};
use std::{fmt, sync::Arc};

/// "Attach this method to the dispatcher named `dispatcher` under `selector`."
pub struct Binding<A, R> {
    dispatcher: String,
    selector: Selector,
    method: Arc<dyn Method<A, R>>,
}

impl<A: 'static, R: 'static> Binding<A, R> {
    /// Create a binding for any [`Method`] implementation.
    pub fn new<M>(dispatcher: impl Into<String>, selector: impl Into<Selector>, method: M) -> Self
    where
        M: Method<A, R>,
    {
        Self {
            dispatcher: dispatcher.into(),
            selector: selector.into(),
            method: Arc::new(method),
        }
    }

    /// Name of the target dispatcher.
    pub fn dispatcher(&self) -> &str {
        &self.dispatcher
    }

    /// The selector the method will be bound under.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl<A, R> fmt::Debug for Binding<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("dispatcher", &self.dispatcher)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// Declares methods against the dispatchers of one registry.
#[derive(Debug, Clone, Copy)]
pub struct Binder<'r> {
    registry: &'r Registry,
}

impl Binder<'static> {
    /// A binder for the global registry.
    pub fn global() -> Self {
        Self::new(Registry::global())
    }
}

impl<'r> Binder<'r> {
    /// A binder for `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Bind `handler` under `selector` on the dispatcher named `dispatcher`.
    ///
    /// Fails with [`RegistryError::UnknownDispatcher`] if no such dispatcher
    /// exists; nothing is created in that case.
    ///
    /// [`RegistryError::UnknownDispatcher`]: multimeth_core::RegistryError::UnknownDispatcher
    pub fn declare<A, R, F>(
        &self,
        dispatcher: &str,
        selector: impl Into<Selector>,
        handler: F,
    ) -> Result<(), MultimethodError>
    where
        A: 'static,
        R: 'static,
        F: Fn(A) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        self.apply(Binding::new(dispatcher, selector, handler))
    }

    /// Bind any [`Method`] implementation by dispatcher name.
    pub fn declare_method<A, R, M>(
        &self,
        dispatcher: &str,
        selector: impl Into<Selector>,
        method: M,
    ) -> Result<(), MultimethodError>
    where
        A: 'static,
        R: 'static,
        M: Method<A, R>,
    {
        self.apply(Binding::new(dispatcher, selector, method))
    }

    /// Resolve the binding's dispatcher and attach its method.
    pub fn apply<A, R>(&self, binding: Binding<A, R>) -> Result<(), MultimethodError>
    where
        A: 'static,
        R: 'static,
    {
        let target = self.registry.lookup::<A, R>(&binding.dispatcher)?;
        target.bind_shared(binding.selector, binding.method)?;
        Ok(())
    }
}

/// Bind `handler` on a dispatcher of the global registry.
pub fn declare<A, R, F>(
    dispatcher: &str,
    selector: impl Into<Selector>,
    handler: F,
) -> Result<(), MultimethodError>
where
    A: 'static,
    R: 'static,
    F: Fn(A) -> Result<R, BoxError> + Send + Sync + 'static,
{
    Binder::global().declare(dispatcher, selector, handler)
}
