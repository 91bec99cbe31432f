//! Path utilities for lock files and duplicate-launch endpoints.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - Every name is derived from an [`AppId`](crate::AppId)
//! - OS-specific root selection is kept in `platform`

mod ensure;
mod error;
mod lock;
mod platform;
mod resolver;
mod signal;

#[cfg(test)]
pub(crate) mod test_utils;

// Error type
pub use error::PathError;

// Root resolution
pub use platform::{LOCK_DIR_ENV, lock_root};

// Derived names
pub use lock::lock_path;
pub use signal::{signal_channel, signal_endpoint};

// Directory operations
pub use ensure::ensure_directory;

// Resolver for adapters and CLI
pub use resolver::InstancePaths;
