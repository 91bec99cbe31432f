//! The answer `check_and_run` gives the host.

/// Outcome of a launch check.
///
/// The third outcome, "cannot safely decide", is an
/// [`InstanceError`](crate::InstanceError), never a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchDecision {
    /// This process owns the lock and may run.
    Owner,
    /// Another live instance owns the lock; it has been asked to foreground.
    AlreadyRunning {
        /// PID recorded by the live owner.
        owner_pid: i32,
    },
}

impl LaunchDecision {
    /// `true` only when this process is the owner.
    pub const fn can_run(self) -> bool {
        matches!(self, Self::Owner)
    }
}
