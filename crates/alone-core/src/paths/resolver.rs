//! All per-application paths captured in one call.

use std::fmt;
use std::path::PathBuf;

use super::{PathError, lock_path, lock_root, signal_channel, signal_endpoint};
use crate::config::InstanceConfig;

/// Resolved locations for one application identifier.
///
/// Use this for wiring adapters and for the `alone paths` CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancePaths {
    /// Directory holding lock files and signal endpoints
    pub lock_root: PathBuf,
    /// Lock record for the application
    pub lock_path: PathBuf,
    /// Duplicate-launch channel name
    pub signal_channel: String,
    /// Socket file backing the duplicate-launch channel
    pub signal_endpoint: PathBuf,
}

impl InstancePaths {
    /// Resolve every path for `config`, creating the lock root if needed.
    pub fn resolve(config: &InstanceConfig) -> Result<Self, PathError> {
        let lock_root = lock_root(config.lock_dir.as_deref())?;
        let lock_path = lock_path(&lock_root, &config.app_id);
        let signal_channel = signal_channel(&config.app_id);
        let signal_endpoint = signal_endpoint(&lock_root, &signal_channel);

        Ok(Self {
            lock_root,
            lock_path,
            signal_channel,
            signal_endpoint,
        })
    }
}

impl fmt::Display for InstancePaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lock root:        {}", self.lock_root.display())?;
        writeln!(f, "Lock file:        {}", self.lock_path.display())?;
        writeln!(f, "Signal channel:   {}", self.signal_channel)?;
        write!(f, "Signal endpoint:  {}", self.signal_endpoint.display())
    }
}
