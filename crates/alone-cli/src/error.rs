//! CLI-specific error types and mappings.
//!
//! Maps coordinator outcomes and errors to exit codes and user-facing
//! messages.

use alone_core::{InstanceError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Another live instance owns the lock.
    #[error("Another instance is already running (pid {owner_pid})")]
    AlreadyRunning { owner_pid: i32 },

    /// Ownership could not be decided safely; retrying later may succeed.
    #[error("{0}")]
    Temporary(String),

    /// Lock directory could not be resolved or created.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The lock path cannot be used (permission denied, a directory in the way).
    #[error("IO error: {0}")]
    Io(String),

    /// Anything else the coordinator reported.
    #[error("{0}")]
    Instance(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 3: Another instance is running
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::AlreadyRunning { .. } => 3,
            Self::Temporary(_) => 75, // EX_TEMPFAIL
            Self::Config(_) => 78,    // EX_CONFIG
            Self::Io(_) => 74,        // EX_IOERR
            Self::Instance(_) => 1,
        }
    }
}

impl From<InstanceError> for CliError {
    fn from(err: InstanceError) -> Self {
        match err {
            InstanceError::Path(path_err) => path_err.into(),
            e @ InstanceError::LockUnavailable { .. } => Self::Io(e.to_string()),
            e if e.is_transient() => Self::Temporary(e.to_string()),
            e => Self::Instance(e.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}
