//! Aspect-oriented advice for cross-cutting concerns.
//!
//! This module provides the before/after hook contract and the wrapper
//! type that routes calls through it, so timing (or any other orthogonal
//! behavior) never touches the business object itself.
//!
//! # Architecture
//!
//! Advice is applied at resolution time by the [`Kernel`](crate::kernel::Kernel),
//! not in implementations:
//!
//! ```ignore
//! // Core implementation - pure business logic
//! impl Worker for Foo { ... }
//!
//! // Capability implemented once more on the wrapper, routing through the host
//! impl<T: Worker> Worker for Intercepted<T> {
//!     fn do_with_timer(&self) -> Result<()> {
//!         self.invoke("DoWithTimer", |inner| inner.do_with_timer())?
//!     }
//! }
//!
//! // Resolve through the kernel - interception is transparent
//! let foo = kernel.get::<Foo>()?;
//! foo.do_with_timer()?;
//! ```
//!
//! # Available Advice
//!
//! - [`TimerInterceptor`] - Reports how long methods marked with
//!   [`TimerIntercept`] take, in 100 ns ticks

mod intercepted;
mod interceptor;
mod timer;

pub use intercepted::Intercepted;
pub use interceptor::Interceptor;
pub use timer::{ReadMode, TimerIntercept, TimerInterceptor};
