//! Process liveness probing.

use alone_core::LivenessProbe;

/// Probes the operating system's process table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLivenessProbe;

impl ProcessLivenessProbe {
    pub const fn new() -> Self {
        Self
    }
}

impl LivenessProbe for ProcessLivenessProbe {
    fn is_alive(&self, pid: i32) -> bool {
        pid_exists(pid)
    }
}

/// Check if a PID exists (without needing to own it).
///
/// Non-positive PIDs are never alive: `kill(0, ..)` and `kill(-n, ..)`
/// address process groups, which would make a corrupted record look alive.
pub fn pid_exists(pid: i32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal;
    use nix::unistd::Pid;

    if pid <= 0 {
        return false;
    }

    // Signal None is the null signal: existence and permission checks only
    match signal::kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::ESRCH) => false, // No such process
        Err(_) => true,             // Process exists but we lack permission
    }
}

/// PID of the calling process, as recorded in lock files.
pub fn current_pid() -> i32 {
    nix::unistd::getpid().as_raw()
}
