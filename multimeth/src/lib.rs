//! # multimeth - Multiple Dispatch on Classification Keys
//!
//! `multimeth` selects, at call time, among several implementations of an
//! operation based on an arbitrary classification of the call's arguments.
//! The classification is a plain function you supply; methods are matched to
//! its result by exact equality. There is no type hierarchy involved.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use multimeth::prelude::*;
//!
//! let combine: Dispatcher<(Value, Value), Value> =
//!     Dispatcher::create("combine", |(x, y): &(Value, Value)| Ok((x.kind(), y.kind())))?;
//!
//! declare("combine", ("int", "int"), |(x, y): (Value, Value)| Ok(x * y))?;
//! declare("combine", DEFAULT, |_: (Value, Value)| Ok(Value::Null))?;
//!
//! assert_eq!(combine.invoke((Value::Int(3), Value::Int(4)))?, Value::Int(12));
//! ```
//!
//! ## Components
//!
//! - [`Registry`]: process-wide name → dispatcher lookup.
//! - [`Dispatcher`]: one multimethod and its resolution algorithm.
//! - [`Binder`]: attaches methods to dispatchers by name.
//! - [`Declaration`]: item-level declarations collected with `inventory`.
//!
//! ## Features
//!
//! - `macros` (default): the `#[method]` attribute.
//! - `tracing` (default): structured `tracing` events for registration,
//!   binding and resolution.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod binder;
mod declaration;
mod dispatcher;
mod registry;

pub use multimeth_core::{
    // Error types
    BindError,
    BoxError,
    // Keys
    ClassKey,
    // Traits
    Classifier,
    DEFAULT,
    DispatchError,
    Method,
    MultimethodError,
    RegistryError,
    Selector,
    TypeTag,
};

pub use binder::{Binder, Binding, declare};
pub use declaration::{
    Declaration, InstallFn, declarations, install_declarations, install_declarations_for,
};
pub use dispatcher::{Dispatcher, DispatcherBuilder, RedefinitionPolicy};
pub use registry::Registry;

/// Prelude module - common imports for multimeth.
///
/// # Usage
///
/// ```rust,ignore
/// use multimeth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, ClassKey, DEFAULT, DispatchError, Dispatcher, DispatcherBuilder, Method,
        MultimethodError, Registry, Selector, declare,
    };
}

#[cfg(feature = "macros")]
pub use multimeth_macros::method;

pub use inventory;
