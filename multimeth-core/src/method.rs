//! # Methods
//!
//! A method is the implementation a dispatcher selects for one classification
//! value. It receives the call's arguments exactly as the caller passed them,
//! never the classification value.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|(x, y): (i64, i64)| Ok(x * y)`
//! 2. **Function item**: any `fn(A) -> Result<R, BoxError>`
//! 3. **Struct implementation**: `impl Method<A, R> for MyMethod`

use crate::error::BoxError;

/// An implementation of a multimethod for one classification value.
///
/// `A` is the argument tuple of the multimethod and `R` its result.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a method taking `{A}` and returning `{R}`",
    label = "missing `Method<{A}, {R}>` implementation",
    note = "Closures `Fn({A}) -> Result<{R}, BoxError>` implement `Method` automatically."
)]
pub trait Method<A, R>: Send + Sync + 'static {
    /// Executes the method with the original call arguments.
    fn call(&self, args: A) -> Result<R, BoxError>;
}

// Blanket impl for closures and function items
impl<F, A, R> Method<A, R> for F
where
    F: Fn(A) -> Result<R, BoxError> + Send + Sync + 'static,
{
    fn call(&self, args: A) -> Result<R, BoxError> {
        (self)(args)
    }
}

/// A dispatch function: classifies a call's arguments.
///
/// The returned key is looked up by exact equality in the method table.
pub trait Classifier<A>: Send + Sync + 'static {
    /// Produces the classification value for `args`.
    fn classify(&self, args: &A) -> Result<crate::ClassKey, BoxError>;
}

impl<F, A> Classifier<A> for F
where
    F: Fn(&A) -> Result<crate::ClassKey, BoxError> + Send + Sync + 'static,
{
    fn classify(&self, args: &A) -> Result<crate::ClassKey, BoxError> {
        (self)(args)
    }
}
