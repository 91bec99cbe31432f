//! Errors surfaced to the host by the instance coordinator.

use std::path::PathBuf;

use thiserror::Error;

use crate::paths::PathError;

/// Failures `check_and_run` cannot resolve locally.
///
/// A rejected launch (another instance is running) is not an error; see
/// [`LaunchDecision`](crate::LaunchDecision).
#[derive(Debug, Error)]
pub enum InstanceError {
    /// Lock root or derived paths could not be resolved.
    #[error("Path resolution failed: {0}")]
    Path(#[from] PathError),

    /// A stale lock was reclaimed but another launch took it before the retry.
    #[error("Lost the race to reclaim stale lock {}", lock_path.display())]
    ReclaimRaceLost { lock_path: PathBuf },

    /// The lock path itself is unusable (permissions, a directory in the
    /// way). Retrying will not help until the path is fixed.
    #[error("Instance lock {} is unavailable: {reason}", lock_path.display())]
    LockUnavailable { lock_path: PathBuf, reason: String },

    /// The coordinator was already disposed.
    #[error("Instance coordinator has been disposed")]
    Disposed,
}

impl InstanceError {
    /// Whether retrying the launch later could succeed.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::ReclaimRaceLost { .. })
    }
}
