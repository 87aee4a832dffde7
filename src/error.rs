// src/error.rs
// Error type shared by every startup stage

use crate::config::ConfigError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ServeError {
    /// The item could not be made absolute or does not exist.
    Resolve { path: PathBuf, source: io::Error },
    DuplicatePattern(String),
    InvalidPattern(String),
    PortInUse(u16),
    Bind { port: u16, source: io::Error },
    Signal(io::Error),
    Config(ConfigError),
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::Resolve { path, source } => {
                write!(f, "Cannot serve {}: {}", path.display(), source)
            }
            ServeError::DuplicatePattern(pattern) => {
                write!(f, "Path {} is already registered", pattern)
            }
            ServeError::InvalidPattern(pattern) => write!(
                f,
                "Invalid path {}: must start with '/' and must not contain '{{' or '}}'",
                pattern
            ),
            ServeError::PortInUse(port) => write!(f, "Port {} is already in use", port),
            ServeError::Bind { port, source } => {
                write!(f, "Failed to listen on port {}: {}", port, source)
            }
            ServeError::Signal(err) => write!(f, "Failed to set up signal handling: {}", err),
            ServeError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServeError::Resolve { source, .. } | ServeError::Bind { source, .. } => Some(source),
            ServeError::Signal(err) => Some(err),
            ServeError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ServeError {
    fn from(err: ConfigError) -> Self {
        ServeError::Config(err)
    }
}
