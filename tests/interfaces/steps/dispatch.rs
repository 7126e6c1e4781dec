//! Dispatch step definitions.

use std::fmt;
use std::sync::Arc;

use cucumber::{given, then, when, World};
use interception::advice::Intercepted;
use interception::demo::{Foo, TimingModule, Worker};
use interception::descriptor::TypeDescriptor;
use interception::kernel::{Injectable, Kernel};
use interception::output::{Buffer, OutputSink};

/// A type whose only method is overridable but unmarked.
pub struct Ledger {
    out: Arc<dyn OutputSink>,
}

impl Injectable for Ledger {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::builder("Ledger").overridable("Post").build()
    }

    fn construct(kernel: &Kernel) -> interception::Result<Self> {
        Ok(Ledger {
            out: kernel.output(),
        })
    }
}

/// Test context for dispatch scenarios.
#[derive(World)]
#[world(init = Self::new)]
pub struct DispatchWorld {
    out: Buffer,
    kernel: Option<Kernel>,
    foo: Option<Intercepted<Foo>>,
    ledger: Option<Intercepted<Ledger>>,
}

impl fmt::Debug for DispatchWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchWorld")
            .field("lines", &self.out.lines())
            .field("foo_resolved", &self.foo.is_some())
            .field("ledger_resolved", &self.ledger.is_some())
            .finish_non_exhaustive()
    }
}

impl DispatchWorld {
    fn new() -> Self {
        Self {
            out: Buffer::new(),
            kernel: None,
            foo: None,
            ledger: None,
        }
    }

    fn kernel(&mut self) -> &mut Kernel {
        self.kernel.as_mut().expect("Kernel not initialized")
    }

    fn line(&self, number: usize) -> String {
        let lines = self.out.lines();
        lines
            .get(number - 1)
            .cloned()
            .unwrap_or_else(|| panic!("Only {} lines printed: {:?}", lines.len(), lines))
    }
}

// --- Background ---

#[given("a kernel loaded with the timing module")]
async fn given_timing_kernel(world: &mut DispatchWorld) {
    let mut kernel = Kernel::with_output(Arc::new(world.out.clone()));
    kernel
        .load(&TimingModule::default())
        .expect("Failed to load timing module");
    world.kernel = Some(kernel);
}

#[given("Foo is resolved from the kernel")]
async fn given_foo_resolved(world: &mut DispatchWorld) {
    let foo = world.kernel().get::<Foo>().expect("Failed to resolve Foo");
    world.foo = Some(foo);
}

// --- Given steps ---

#[given("a ledger type with only an unmarked overridable method")]
async fn given_ledger(world: &mut DispatchWorld) {
    world.kernel().bind::<Ledger>().to_self();
    assert!(!world.kernel().is_intercepted::<Ledger>().unwrap());
    let ledger = world.kernel().get::<Ledger>().expect("Failed to resolve Ledger");
    world.ledger = Some(ledger);
}

// --- When steps ---

#[when(expr = "{string} is called")]
async fn when_called(world: &mut DispatchWorld, method: String) {
    let foo = world.foo.as_ref().expect("Foo not resolved");
    let result = match method.as_str() {
        "Do" => foo.do_work(),
        "DoWithTimer" => foo.do_with_timer(),
        other => panic!("Foo has no method {}", other),
    };
    result.expect("Call failed");
}

#[when("the ledger posts")]
async fn when_ledger_posts(world: &mut DispatchWorld) {
    world
        .ledger
        .as_ref()
        .expect("Ledger not resolved")
        .invoke("Post", |l| l.out.line("Posting.."))
        .expect("Call failed");
}

// --- Then steps ---

#[then(expr = "{int} line(s) is/are printed")]
async fn then_line_count(world: &mut DispatchWorld, count: usize) {
    let lines = world.out.lines();
    assert_eq!(lines.len(), count, "Printed: {:?}", lines);
}

#[then(expr = "line {int} is {string}")]
async fn then_line_is(world: &mut DispatchWorld, number: usize, expected: String) {
    assert_eq!(world.line(number), expected);
}

#[then(expr = "line {int} reports the ticks taken by {string}")]
async fn then_line_reports_ticks(world: &mut DispatchWorld, number: usize, method: String) {
    let line = world.line(number);
    let prefix = format!("The method {} execution took ", method);
    let ticks = line
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix(" ticks."))
        .unwrap_or_else(|| panic!("Unexpected line: {}", line));
    assert!(
        ticks.parse::<u64>().is_ok(),
        "Ticks should be a non-negative integer: {}",
        line
    );
}
