//! Error types for multimeth.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`MultimethodError`] - Top-level error type for all multimeth operations
//! - [`RegistryError`] - Errors while registering or resolving a dispatcher by name
//! - [`BindError`] - Errors while attaching a method to a dispatcher's table
//! - [`DispatchError`] - Errors during invocation

use crate::key::{ClassKey, Selector};
use thiserror::Error;

/// A boxed error type for failures raised by user-supplied functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all multimeth operations.
#[derive(Error, Debug)]
pub enum MultimethodError {
    /// An error occurred in the dispatcher registry.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An error occurred while binding a method.
    #[error("bind error: {0}")]
    Bind(#[from] BindError),

    /// An error occurred during dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Errors that can occur while registering or resolving dispatchers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A dispatcher with this name already exists.
    #[error("a dispatcher named `{0}` is already registered")]
    DuplicateName(String),

    /// No dispatcher with this name exists.
    #[error("no dispatcher named `{0}` is registered")]
    UnknownDispatcher(String),

    /// The dispatcher exists but with different argument or result types.
    #[error("dispatcher `{name}` is a `{found}`, not a `{expected}`")]
    SignatureMismatch {
        /// Name of the dispatcher.
        name: String,
        /// The handle type that was requested.
        expected: &'static str,
        /// The handle type that is registered.
        found: &'static str,
    },
}

/// Errors that can occur while binding a method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The selector already has a method and the dispatcher refuses redefinition.
    #[error("dispatcher `{dispatcher}` already has a method for {selector}")]
    Redefinition {
        /// Name of the dispatcher.
        dispatcher: String,
        /// The selector that is already bound.
        selector: Selector,
    },
}

/// Errors that can occur while invoking a dispatcher.
///
/// A failure raised by the dispatch function is passed through as
/// [`DispatchError::Failed`] with its own message and source chain. A failure
/// raised by a method is wrapped with the dispatcher name and key.
/// [`DispatchError::into_source`] hands either back unmodified so callers can
/// downcast to their own error types.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No method matches the classification value and no default is bound.
    #[error("no method of `{dispatcher}` matches {key}")]
    NoMatchingMethod {
        /// Name of the dispatcher.
        dispatcher: String,
        /// The unmatched classification value.
        key: ClassKey,
    },

    /// The dispatch function failed.
    #[error(transparent)]
    Failed(BoxError),

    /// The selected method failed.
    #[error("method of `{dispatcher}` for {key} failed: {source}")]
    Method {
        /// Name of the dispatcher.
        dispatcher: String,
        /// The classification value the method was selected for.
        key: ClassKey,
        /// The failure raised by the method.
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Name of the dispatcher that failed.
    ///
    /// `None` for [`DispatchError::Failed`], which carries only the dispatch
    /// function's own error.
    pub fn dispatcher(&self) -> Option<&str> {
        match self {
            DispatchError::NoMatchingMethod { dispatcher, .. }
            | DispatchError::Method { dispatcher, .. } => Some(dispatcher),
            DispatchError::Failed(_) => None,
        }
    }

    /// The classification value, if the dispatch function produced one.
    pub fn key(&self) -> Option<&ClassKey> {
        match self {
            DispatchError::NoMatchingMethod { key, .. } | DispatchError::Method { key, .. } => {
                Some(key)
            }
            DispatchError::Failed(_) => None,
        }
    }

    /// Whether this is a [`DispatchError::NoMatchingMethod`].
    pub fn is_no_match(&self) -> bool {
        matches!(self, DispatchError::NoMatchingMethod { .. })
    }

    /// The user failure, exactly as the dispatch function or method raised it.
    ///
    /// Returns `None` for [`DispatchError::NoMatchingMethod`].
    pub fn into_source(self) -> Option<BoxError> {
        match self {
            DispatchError::NoMatchingMethod { .. } => None,
            DispatchError::Failed(source) | DispatchError::Method { source, .. } => Some(source),
        }
    }
}
