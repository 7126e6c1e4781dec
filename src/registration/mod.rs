//! Kernel registration: modules and binding builders.
//!
//! Bindings are declared fluently on a [`Kernel`]:
//!
//! ```ignore
//! kernel.bind::<Foo>().to_self();
//! kernel
//!     .intercept(MarkedOverridable::<TimerIntercept>::new())
//!     .with(TimerInterceptor::new());
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use crate::advice::Interceptor;
use crate::error::Result;
use crate::kernel::{Factory, Injectable, Kernel};
use crate::selection::SelectionRule;

/// A unit of kernel configuration.
pub trait Module {
    /// Label used in log output.
    fn name(&self) -> &str;

    /// Register this module's bindings on `kernel`.
    fn load(&self, kernel: &mut Kernel) -> Result<()>;
}

/// Completes a type binding started with [`Kernel::bind`].
#[must_use = "a binding is only registered by to_self or to_method"]
pub struct BindingBuilder<'k, T> {
    kernel: &'k mut Kernel,
    _type: PhantomData<fn() -> T>,
}

impl<'k, T: Injectable> BindingBuilder<'k, T> {
    pub(crate) fn new(kernel: &'k mut Kernel) -> Self {
        Self {
            kernel,
            _type: PhantomData,
        }
    }

    /// Construct `T` with [`Injectable::construct`].
    pub fn to_self(self) -> &'k mut Kernel {
        let factory: Factory<T> = Arc::new(T::construct);
        self.kernel.add_binding(factory);
        self.kernel
    }

    /// Construct `T` with a custom factory.
    pub fn to_method<F>(self, factory: F) -> &'k mut Kernel
    where
        F: Fn(&Kernel) -> Result<T> + Send + Sync + 'static,
    {
        let factory: Factory<T> = Arc::new(factory);
        self.kernel.add_binding(factory);
        self.kernel
    }
}

/// Completes an interception binding started with [`Kernel::intercept`].
#[must_use = "an interception is only registered by with or with_shared"]
pub struct InterceptBuilder<'k> {
    kernel: &'k mut Kernel,
    rule: Box<dyn SelectionRule>,
}

impl<'k> InterceptBuilder<'k> {
    pub(crate) fn new(kernel: &'k mut Kernel, rule: Box<dyn SelectionRule>) -> Self {
        Self { kernel, rule }
    }

    /// Attach `interceptor` to every type the rule selects.
    pub fn with(self, interceptor: impl Interceptor + 'static) -> &'k mut Kernel {
        self.with_shared(Arc::new(interceptor))
    }

    /// Attach an interceptor instance that is also used elsewhere.
    pub fn with_shared(self, interceptor: Arc<dyn Interceptor>) -> &'k mut Kernel {
        self.kernel.add_interception(self.rule, interceptor);
        self.kernel
    }
}
