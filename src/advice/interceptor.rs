//! The before/after hook contract.

use crate::invocation::Invocation;
use crate::output::OutputSink;

/// A before/after hook pair run by the host around matched calls.
///
/// The host calls `before`, then the wrapped method, then `after`, on the
/// calling thread, with the same [`Invocation`] for both hooks. Anything
/// an interceptor needs to carry from `before` to `after` belongs on the
/// invocation; one interceptor instance is shared by every call and type
/// it is attached to.
pub trait Interceptor: Send + Sync {
    /// Label used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn before(&self, invocation: &mut Invocation<'_>, out: &dyn OutputSink);

    fn after(&self, invocation: &mut Invocation<'_>, out: &dyn OutputSink);
}
