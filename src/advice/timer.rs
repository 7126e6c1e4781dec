//! Execution-time advice.
//!
//! Reports how long each call to a method marked with [`TimerIntercept`]
//! takes. Unmarked methods pass through without output.

use serde::Deserialize;
use tracing::debug;

use super::Interceptor;
use crate::descriptor::Marker;
use crate::invocation::Invocation;
use crate::output::OutputSink;

/// Marks a method whose execution time should be reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerIntercept;

impl Marker for TimerIntercept {
    const NAME: &'static str = "TimerIntercept";
}

/// When the elapsed time is read relative to stopping the stopwatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadMode {
    /// Stop the stopwatch, then read it. The reported duration covers the
    /// wrapped call only.
    #[default]
    StopThenRead,
    /// Read while the stopwatch is still running. The reported duration
    /// also includes the time spent formatting the report.
    Running,
}

/// Times calls to methods marked with [`TimerIntercept`].
///
/// Emits two lines per marked call:
/// - `The method {name} start's running.` before the call
/// - `The method {name} execution took {ticks} ticks.` after it
///
/// # Example
///
/// ```ignore
/// kernel
///     .intercept(MarkedOverridable::<TimerIntercept>::new())
///     .with(TimerInterceptor::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimerInterceptor {
    read_mode: ReadMode,
}

impl TimerInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    pub fn read_mode(&self) -> ReadMode {
        self.read_mode
    }
}

impl Interceptor for TimerInterceptor {
    fn name(&self) -> &'static str {
        "timer"
    }

    fn before(&self, invocation: &mut Invocation<'_>, out: &dyn OutputSink) {
        let relevant = invocation.method().has_marker::<TimerIntercept>();
        invocation.set_relevant(relevant);
        if !relevant {
            return;
        }

        out.line(&format!(
            "The method {} start's running.",
            invocation.method().name()
        ));
        invocation.stopwatch_mut().restart();
    }

    fn after(&self, invocation: &mut Invocation<'_>, out: &dyn OutputSink) {
        if !invocation.is_relevant() {
            return;
        }

        if self.read_mode == ReadMode::StopThenRead {
            invocation.stopwatch_mut().stop();
        }
        let ticks = invocation.stopwatch().elapsed_ticks();
        out.line(&format!(
            "The method {} execution took {} ticks.",
            invocation.method().name(),
            ticks
        ));
        debug!(
            invocation_id = %invocation.id(),
            method = invocation.method().name(),
            ticks,
            "timed call"
        );
        invocation.stopwatch_mut().reset();
    }
}
