//! Builder for dispatchers with non-default options.

use super::Dispatcher;
use crate::registry::Registry;
use multimeth_core::{BoxError, ClassKey, RegistryError};

/// What a dispatcher does when a selector that already has a method is bound
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedefinitionPolicy {
    /// The later method silently replaces the earlier one.
    #[default]
    Replace,
    /// The bind fails with [`BindError::Redefinition`](multimeth_core::BindError::Redefinition).
    Reject,
}

/// Builder for constructing a [`Dispatcher`].
///
/// # Example
/// ```ignore
/// let area: Dispatcher<(Shape,), f64> = DispatcherBuilder::new("area")
///     .reject_redefinition()
///     .create(|(shape,): &(Shape,)| Ok(shape.kind()))?;
/// ```
#[derive(Debug, Clone)]
pub struct DispatcherBuilder {
    name: String,
    redefinition: RedefinitionPolicy,
}

impl DispatcherBuilder {
    /// Start building a dispatcher called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            redefinition: RedefinitionPolicy::default(),
        }
    }

    /// Set the redefinition policy.
    pub fn on_redefinition(mut self, policy: RedefinitionPolicy) -> Self {
        self.redefinition = policy;
        self
    }

    /// Refuse to bind a selector twice.
    pub fn reject_redefinition(self) -> Self {
        self.on_redefinition(RedefinitionPolicy::Reject)
    }

    /// Create the dispatcher and register it in the global registry.
    pub fn create<A, R, F, K>(self, dispatch_fn: F) -> Result<Dispatcher<A, R>, RegistryError>
    where
        A: 'static,
        R: 'static,
        F: Fn(&A) -> Result<K, BoxError> + Send + Sync + 'static,
        K: Into<ClassKey>,
    {
        self.create_in(Registry::global(), dispatch_fn)
    }

    /// Create the dispatcher and register it in `registry`.
    pub fn create_in<A, R, F, K>(
        self,
        registry: &Registry,
        dispatch_fn: F,
    ) -> Result<Dispatcher<A, R>, RegistryError>
    where
        A: 'static,
        R: 'static,
        F: Fn(&A) -> Result<K, BoxError> + Send + Sync + 'static,
        K: Into<ClassKey>,
    {
        let classifier = move |args: &A| -> Result<ClassKey, BoxError> {
            dispatch_fn(args).map(Into::into)
        };
        let dispatcher =
            Dispatcher::unregistered(self.name, self.redefinition, Box::new(classifier));
        registry.register(&dispatcher)?;
        Ok(dispatcher)
    }
}
