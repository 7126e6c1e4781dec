//! Demo business object and the module that wires timing advice onto it.

use std::sync::Arc;

use crate::advice::{Intercepted, ReadMode, TimerIntercept, TimerInterceptor};
use crate::config::TimerConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::kernel::{Injectable, Kernel};
use crate::output::OutputSink;
use crate::registration::Module;
use crate::selection::MarkedOverridable;

/// Method name of [`Worker::do_work`].
pub const DO: &str = "Do";
/// Method name of [`Worker::do_with_timer`].
pub const DO_WITH_TIMER: &str = "DoWithTimer";

/// The capability `Foo` offers.
pub trait Worker {
    /// Plain work. Never intercepted.
    fn do_work(&self) -> Result<()>;

    /// Work whose execution time is reported.
    fn do_with_timer(&self) -> Result<()>;
}

/// Business object with one timed and one untimed method.
pub struct Foo {
    out: Arc<dyn OutputSink>,
}

impl Foo {
    pub fn new(out: Arc<dyn OutputSink>) -> Self {
        Self { out }
    }
}

impl Worker for Foo {
    fn do_work(&self) -> Result<()> {
        self.out.line("Doing..");
        Ok(())
    }

    fn do_with_timer(&self) -> Result<()> {
        self.out.line("Doing..");
        Ok(())
    }
}

impl Injectable for Foo {
    // Only overridable methods can be wrapped; `Do` is declared plain.
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::builder("Foo")
            .overridable(DO_WITH_TIMER)
            .mark::<TimerIntercept>(DO_WITH_TIMER)
            .method(DO)
            .build()
    }

    fn construct(kernel: &Kernel) -> Result<Self> {
        Ok(Foo::new(kernel.output()))
    }
}

impl<T: Worker> Worker for Intercepted<T> {
    fn do_work(&self) -> Result<()> {
        self.invoke(DO, |inner| inner.do_work())?
    }

    fn do_with_timer(&self) -> Result<()> {
        self.invoke(DO_WITH_TIMER, |inner| inner.do_with_timer())?
    }
}

/// Call the untimed then the timed method of `foo`, announcing each call.
pub fn run(foo: &impl Worker, out: &dyn OutputSink) -> Result<()> {
    out.line("Do without timer interception begining call...");
    foo.do_work()?;
    out.line("Do without timer interception executed.");

    out.line("Method DoWithTimer with timer interception begining call...");
    foo.do_with_timer()?;
    out.line("Method DoWithTimer with timer interception executed.");

    Ok(())
}

/// Binds [`Foo`] and times every type with an overridable method marked
/// [`TimerIntercept`].
#[derive(Debug, Clone, Default)]
pub struct TimingModule {
    read_mode: ReadMode,
}

impl TimingModule {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            read_mode: config.read_mode,
        }
    }
}

impl Module for TimingModule {
    fn name(&self) -> &str {
        "timing"
    }

    fn load(&self, kernel: &mut Kernel) -> Result<()> {
        kernel.bind::<Foo>().to_self();
        kernel
            .intercept(MarkedOverridable::<TimerIntercept>::new())
            .with(TimerInterceptor::new().with_read_mode(self.read_mode));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Buffer;

    fn kernel(out: &Buffer) -> Kernel {
        let mut kernel = Kernel::with_output(Arc::new(out.clone()));
        kernel.load(&TimingModule::default()).unwrap();
        kernel
    }

    #[test]
    fn test_foo_is_intercepted() {
        let out = Buffer::new();
        let kernel = kernel(&out);
        assert!(kernel.is_intercepted::<Foo>().unwrap());
    }

    #[test]
    fn test_do_prints_one_line() {
        let out = Buffer::new();
        let foo = kernel(&out).get::<Foo>().unwrap();

        foo.do_work().unwrap();

        assert_eq!(out.lines(), vec!["Doing.."]);
    }

    #[test]
    fn test_do_with_timer_prints_three_lines() {
        let out = Buffer::new();
        let foo = kernel(&out).get::<Foo>().unwrap();

        foo.do_with_timer().unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "The method DoWithTimer start's running.");
        assert_eq!(lines[1], "Doing..");
        assert!(lines[2].starts_with("The method DoWithTimer execution took "));
        assert!(lines[2].ends_with(" ticks."));
    }

    #[test]
    fn test_run_prints_demo_sequence() {
        let out = Buffer::new();
        let foo = kernel(&out).get::<Foo>().unwrap();

        run(&foo, &out).unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Do without timer interception begining call...");
        assert_eq!(lines[1], "Doing..");
        assert_eq!(lines[2], "Do without timer interception executed.");
        assert_eq!(
            lines[3],
            "Method DoWithTimer with timer interception begining call..."
        );
        assert_eq!(lines[4], "The method DoWithTimer start's running.");
        assert_eq!(lines[5], "Doing..");
        assert!(lines[6].starts_with("The method DoWithTimer execution took "));
        assert!(lines[6].ends_with(" ticks."));
        assert_eq!(
            lines[7],
            "Method DoWithTimer with timer interception executed."
        );
    }

    #[test]
    fn test_run_on_unwrapped_foo_has_no_timing_lines() {
        let out = Buffer::new();
        let foo = Foo::new(Arc::new(out.clone()));

        run(&foo, &out).unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| !l.starts_with("The method")));
    }

    #[test]
    fn test_unwrapped_foo_prints_no_timing() {
        let out = Buffer::new();
        let foo = Foo::new(Arc::new(out.clone()));

        foo.do_with_timer().unwrap();

        assert_eq!(out.lines(), vec!["Doing.."]);
    }
}
