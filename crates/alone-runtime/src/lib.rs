//! OS adapters and the instance coordinator.
//!
//! `alone-core` declares the ports; this crate implements them with an
//! advisory-locked lock file, a `kill(pid, 0)` liveness probe and a Unix
//! datagram socket for duplicate-launch signals, and wires them into
//! [`InstanceCoordinator`].
#![deny(unsafe_code)]

// The lock relies on advisory flock(2) semantics and the signal on Unix
// domain sockets. Windows byte-range locks are mandatory and would block
// other processes from reading the owner record.
#[cfg(not(unix))]
compile_error!("alone-runtime supports Unix targets only");

pub mod coordinator;
pub mod liveness;
pub mod lockfile;
pub mod signal;

// Re-export the coordinator and its default adapters
pub use coordinator::InstanceCoordinator;
pub use liveness::{ProcessLivenessProbe, current_pid, pid_exists};
pub use lockfile::LockManager;
pub use signal::SocketLaunchSignal;
