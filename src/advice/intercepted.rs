//! Interception wrapper.
//!
//! Wraps a resolved instance so that calls to its overridable methods run
//! through the interceptors the kernel matched for its type.

use std::sync::Arc;

use tracing::{debug_span, trace};

use super::Interceptor;
use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::invocation::Invocation;
use crate::output::OutputSink;

/// Wrapper that routes method calls through matched interceptors.
///
/// The wrapper implements the same capability traits as the wrapped type;
/// each trait method names itself to [`Intercepted::invoke`] and passes
/// the real call as a closure.
///
/// Calls go straight to the inner value when no interceptor matched the
/// type or the called method is not overridable.
///
/// # Example
///
/// ```ignore
/// impl<T: Worker> Worker for Intercepted<T> {
///     fn do_with_timer(&self) -> Result<()> {
///         self.invoke("DoWithTimer", |inner| inner.do_with_timer())?
///     }
/// }
/// ```
pub struct Intercepted<T> {
    inner: T,
    descriptor: Arc<TypeDescriptor>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    output: Arc<dyn OutputSink>,
}

impl<T> Intercepted<T> {
    /// Wrap `inner` with the interceptors matched for its type.
    ///
    /// # Arguments
    /// * `inner` - The instance to wrap
    /// * `descriptor` - Methods declared by the instance's type
    /// * `interceptors` - Interceptors in registration order
    /// * `output` - Sink handed to every hook
    pub fn new(
        inner: T,
        descriptor: Arc<TypeDescriptor>,
        interceptors: Vec<Arc<dyn Interceptor>>,
        output: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            inner,
            descriptor,
            interceptors,
            output,
        }
    }

    /// Get a reference to the inner value.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume the wrapper and return the inner value.
    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Whether any interceptor is attached to this instance.
    pub fn is_intercepted(&self) -> bool {
        !self.interceptors.is_empty()
    }

    /// Dispatch a call to `method` through the attached interceptors.
    ///
    /// Returns [`Error::UnknownMethod`] if `method` is not declared on the
    /// wrapped type; the call is not made in that case.
    pub fn invoke<R>(&self, method: &str, call: impl FnOnce(&T) -> R) -> Result<R> {
        let inner = &self.inner;
        dispatch(
            &self.descriptor,
            &self.interceptors,
            self.output.as_ref(),
            method,
            || call(inner),
        )
    }

    /// Like [`Intercepted::invoke`] for methods taking `&mut self`.
    pub fn invoke_mut<R>(&mut self, method: &str, call: impl FnOnce(&mut T) -> R) -> Result<R> {
        let inner = &mut self.inner;
        dispatch(
            &self.descriptor,
            &self.interceptors,
            self.output.as_ref(),
            method,
            || call(inner),
        )
    }
}

fn dispatch<R>(
    descriptor: &TypeDescriptor,
    interceptors: &[Arc<dyn Interceptor>],
    output: &dyn OutputSink,
    method: &str,
    call: impl FnOnce() -> R,
) -> Result<R> {
    let method = descriptor
        .method(method)
        .ok_or_else(|| Error::UnknownMethod {
            type_name: descriptor.name().to_string(),
            method: method.to_string(),
        })?;

    if interceptors.is_empty() || !method.is_overridable() {
        return Ok(call());
    }

    let mut invocation = Invocation::with_slots(method, interceptors.len());
    let span = debug_span!(
        "invocation",
        id = %invocation.id(),
        type_name = descriptor.name(),
        method = method.name()
    );
    let _guard = span.enter();

    for (index, interceptor) in interceptors.iter().enumerate() {
        invocation.select(index);
        trace!(interceptor = interceptor.name(), "before");
        interceptor.before(&mut invocation, output);
    }

    let result = call();

    for (index, interceptor) in interceptors.iter().enumerate().rev() {
        invocation.select(index);
        trace!(interceptor = interceptor.name(), "after");
        interceptor.after(&mut invocation, output);
    }

    Ok(result)
}
