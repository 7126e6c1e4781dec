//! Per-call invocation records.
//!
//! An [`Invocation`] is created by the host right before dispatch, handed
//! to every `before` hook, reused for the `after` hooks and dropped when
//! the call returns. Interceptor state that must survive from `before` to
//! `after` (relevance flag, elapsed-time accumulator) lives here so that
//! interceptor instances stay stateless and shareable across threads.
//!
//! Each interceptor attached to the call gets its own [`CallState`] slot;
//! the host selects the slot before running that interceptor's hooks.

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::descriptor::MethodDescriptor;

/// Nanoseconds per tick. One tick is 100 ns.
pub const NANOS_PER_TICK: u128 = 100;

/// One in-flight call.
#[derive(Debug)]
pub struct Invocation<'a> {
    id: Uuid,
    method: &'a MethodDescriptor,
    slots: Vec<CallState>,
    current: usize,
}

/// State one interceptor keeps for the duration of one call.
#[derive(Debug, Clone, Default)]
pub struct CallState {
    relevant: bool,
    stopwatch: Stopwatch,
}

impl<'a> Invocation<'a> {
    /// Record for a call observed by a single interceptor.
    pub fn new(method: &'a MethodDescriptor) -> Self {
        Self::with_slots(method, 1)
    }

    /// Record for a call observed by `interceptors` interceptors.
    pub fn with_slots(method: &'a MethodDescriptor, interceptors: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            slots: vec![CallState::default(); interceptors.max(1)],
            current: 0,
        }
    }

    /// Point the state accessors at the slot of interceptor `index`.
    pub(crate) fn select(&mut self, index: usize) {
        debug_assert!(index < self.slots.len());
        self.current = index.min(self.slots.len() - 1);
    }

    /// Unique id for this call, used to correlate log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn method(&self) -> &'a MethodDescriptor {
        self.method
    }

    /// Whether the interceptor decided in `before` that this call concerns it.
    pub fn is_relevant(&self) -> bool {
        self.slots[self.current].relevant
    }

    pub fn set_relevant(&mut self, relevant: bool) {
        self.slots[self.current].relevant = relevant;
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.slots[self.current].stopwatch
    }

    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.slots[self.current].stopwatch
    }
}

/// Elapsed-time accumulator with start/stop/reset semantics.
///
/// Starting a running stopwatch is a no-op. Elapsed time accumulates
/// across start/stop pairs until [`Stopwatch::reset`].
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    accumulated: Duration,
    started: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
    }

    /// Stop and zero the accumulator.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started = None;
    }

    /// Zero the accumulator and start measuring.
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Total measured time, including the current running interval.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.accumulated + started.elapsed(),
            None => self.accumulated,
        }
    }

    /// Total measured time in 100 ns ticks.
    pub fn elapsed_ticks(&self) -> u64 {
        u64::try_from(self.elapsed().as_nanos() / NANOS_PER_TICK).unwrap_or(u64::MAX)
    }
}
