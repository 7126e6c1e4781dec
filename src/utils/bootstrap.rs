//! Bootstrap utilities for interception binaries.
//!
//! Shared initialization code for the demo binary and anything else
//! built on the kernel.

use std::io::Read;

use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;
use crate::error::Result;

/// Initialize tracing with INTERCEPTION_LOG environment variable.
///
/// Defaults to "warn" level if INTERCEPTION_LOG is not set. Logs go to
/// stderr; stdout is reserved for progress lines.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Block until one byte is available on `input`.
///
/// End of input counts as a key press.
pub fn wait_for_key(mut input: impl Read) -> Result<()> {
    let mut key = [0u8; 1];
    let read = input.read(&mut key)?;
    debug!(bytes = read, "key press received");
    Ok(())
}
