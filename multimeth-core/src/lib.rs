//! # multimeth-core
//!
//! Core types for the multimeth multiple dispatch engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! libraries that provide methods or dispatch functions without depending on
//! the registry implementation in `multimeth`.
//!
//! # Vocabulary
//!
//! - [`ClassKey`]: the classification value a dispatch function produces.
//!   Lookup is by exact equality.
//! - [`Selector`]: the slot a method is bound under, a key or the
//!   [`DEFAULT`] marker.
//! - [`Classifier`]: the dispatch function.
//! - [`Method`]: the implementation selected for one classification value.
//!
//! # Error Types
//!
//! - [`MultimethodError`] - Top-level error type
//! - [`RegistryError`] - Name registration and lookup errors
//! - [`BindError`] - Method table errors
//! - [`DispatchError`] - Invocation errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod key;
mod method;

// Re-exports
pub use error::{BindError, BoxError, DispatchError, MultimethodError, RegistryError};
pub use key::{ClassKey, DEFAULT, Selector, TypeTag};
pub use method::{Classifier, Method};
