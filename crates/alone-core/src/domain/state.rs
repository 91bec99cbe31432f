//! Coordinator lifecycle states.

use std::fmt;

/// Where an instance coordinator is in its lifecycle.
///
/// ```text
/// Idle -> Attempting -> Owner -> Disposed
///                    \-> Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    /// Nothing attempted yet.
    #[default]
    Idle,
    /// `check_and_run` is in progress.
    Attempting,
    /// This process holds the lock and listens for duplicate launches.
    Owner,
    /// A verified live owner exists; this process must not run.
    Rejected,
    /// Terminal: resources released.
    Disposed,
}

impl CoordinatorState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Attempting => "attempting",
            Self::Owner => "owner",
            Self::Rejected => "rejected",
            Self::Disposed => "disposed",
        }
    }
}

impl fmt::Display for CoordinatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
