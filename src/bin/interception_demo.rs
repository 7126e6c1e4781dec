//! interception-demo: timing advice on a plain business object
//!
//! Resolves `Foo` from a kernel configured with the timing module, calls
//! its untimed and timed methods, then waits for a key press.
//!
//! The wait reads one byte from stdin. A terminal delivers input line by
//! line, so an interactive user has to press Enter; end of input also ends
//! the wait.
//!
//! ## Configuration
//! - INTERCEPTION_CONFIG: Path to a YAML config file (optional)
//! - INTERCEPTION__TIMER__READ_MODE: `stop_then_read` (default) or `running`
//! - INTERCEPTION__DEMO__WAIT_FOR_KEY: Wait for a key press before exiting (default: true)
//! - INTERCEPTION_LOG: Log filter (default: warn)

use tracing::info;

use interception::config::Config;
use interception::demo::{self, Foo, TimingModule};
use interception::kernel::Kernel;
use interception::output::{OutputSink, Stdout};
use interception::utils::bootstrap::{init_tracing, wait_for_key};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::load(None)?;
    info!(read_mode = ?config.timer.read_mode, "interception-demo started");

    let out = Stdout;
    out.line("Init...");
    let kernel = Kernel::with_modules(&[&TimingModule::new(&config.timer)])?;
    let foo = kernel.get::<Foo>()?;

    demo::run(&foo, &out)?;

    if config.demo.wait_for_key {
        wait_for_key(std::io::stdin().lock())?;
    }

    Ok(())
}
