//! Distributed method declarations.
//!
//! Methods can be declared at item level anywhere in the program with
//! [`declare_method!`](crate::declare_method) or the `#[method]` attribute.
//! Each declaration is collected with `inventory` and installed later by
//! [`install_declarations`], once the dispatchers it targets have been
//! created.
//!
//! # Example
//! ```rust,ignore
//! // shapes/square.rs
//! multimeth::declare_method!("area", "square", |(s,): (Shape,)| Ok(s.side * s.side));
//!
//! // main.rs
//! let area: Dispatcher<(Shape,), f64> =
//!     Dispatcher::create("area", |(s,): &(Shape,)| Ok(s.kind()))?;
//! multimeth::install_declarations_for(Registry::global(), "area")?;
//! ```

use crate::{binder::Binder, registry::Registry};
use multimeth_core::MultimethodError;
use std::fmt;

/// Installs one declared method through a [`Binder`].
pub type InstallFn = fn(&Binder<'_>) -> Result<(), MultimethodError>;

/// A method declaration collected at link time.
pub struct Declaration {
    dispatcher: &'static str,
    install: InstallFn,
}

impl Declaration {
    /// Create a declaration targeting the dispatcher named `dispatcher`.
    pub const fn new(dispatcher: &'static str, install: InstallFn) -> Self {
        Self {
            dispatcher,
            install,
        }
    }

    /// Name of the target dispatcher.
    pub fn dispatcher(&self) -> &'static str {
        self.dispatcher
    }

    /// Bind the declared method through `binder`.
    pub fn install(&self, binder: &Binder<'_>) -> Result<(), MultimethodError> {
        (self.install)(binder)
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

inventory::collect!(Declaration);

/// All declarations linked into the program, in unspecified order.
pub fn declarations() -> impl Iterator<Item = &'static Declaration> {
    inventory::iter::<Declaration>.into_iter()
}

/// Install every collected declaration into `registry`.
///
/// Every targeted dispatcher must already exist. Stops at the first failure
/// and returns the number of methods installed otherwise.
pub fn install_declarations(registry: &Registry) -> Result<usize, MultimethodError> {
    install_matching(registry, |_| true)
}

/// Install the collected declarations that target `dispatcher`.
pub fn install_declarations_for(
    registry: &Registry,
    dispatcher: &str,
) -> Result<usize, MultimethodError> {
    install_matching(registry, |declaration| declaration.dispatcher == dispatcher)
}

fn install_matching(
    registry: &Registry,
    filter: impl Fn(&Declaration) -> bool,
) -> Result<usize, MultimethodError> {
    let binder = Binder::new(registry);
    let mut installed = 0;
    for declaration in declarations().filter(|d| filter(d)) {
        declaration.install(&binder)?;
        installed += 1;
    }

    #[cfg(feature = "tracing")]
    tracing::info!(installed, "installed declared methods");
    Ok(installed)
}

/// Declares a method at item level, to be installed by
/// [`install_declarations`](crate::install_declarations).
///
/// The handler expression is evaluated at install time. Closure parameters
/// need type annotations, since the target dispatcher is only known by name.
///
/// # Example
/// ```rust,ignore
/// multimeth::declare_method!("combine", ("int", "int"), |(x, y): (Value, Value)| {
///     Ok(Value::Int(x.as_int()? * y.as_int()?))
/// });
/// multimeth::declare_method!("combine", multimeth::DEFAULT, |_: (Value, Value)| Ok(Value::Null));
/// ```
#[macro_export]
macro_rules! declare_method {
    ($dispatcher:expr, $selector:expr, $handler:expr $(,)?) => {
        $crate::inventory::submit! {
            $crate::Declaration::new($dispatcher, {
                fn __multimeth_install(
                    binder: &$crate::Binder<'_>,
                ) -> ::core::result::Result<(), $crate::MultimethodError> {
                    binder.declare($dispatcher, $selector, $handler)
                }
                __multimeth_install
            })
        }
    };
}
