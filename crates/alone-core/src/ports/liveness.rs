//! Liveness probe port.
//!
//! Implementations answer "does this PID refer to a running process?"
//! without needing permission to signal or inspect it.

/// Port for checking whether a process exists.
pub trait LivenessProbe: Send + Sync {
    /// Whether `pid` currently refers to a running process.
    ///
    /// Implementations must return `false` for `pid <= 0` and must treat
    /// "exists but not ours" as alive. Never panics for unknown PIDs.
    fn is_alive(&self, pid: i32) -> bool;
}

impl<T: LivenessProbe + ?Sized> LivenessProbe for std::sync::Arc<T> {
    fn is_alive(&self, pid: i32) -> bool {
        (**self).is_alive(pid)
    }
}
