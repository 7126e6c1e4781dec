//! Error types for the interception host.

/// Errors raised by the kernel and the binaries built on it.
///
/// Selection rules and interceptor hooks never fail; every variant here
/// comes from the host side (resolution, dispatch, configuration, console).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Type '{type_name}' is not bound in the kernel")]
    Unbound { type_name: &'static str },

    #[error("Method '{method}' is not declared on type '{type_name}'")]
    UnknownMethod {
        type_name: String,
        method: String,
    },

    #[error("Failed to load config: {0}")]
    Config(String),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, Error>;
