//! Port definitions (trait abstractions) for OS-level collaborators.
//!
//! Ports define the interfaces the coordinator expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No file descriptors, sockets, or `nix` types in any signature
//! - Record I/O failures degrade to `None`; lock failures say whether they
//!   were contention or I/O
//! - Signal failures are reportable but never fatal

pub mod instance_lock;
pub mod launch_signal;
pub mod liveness;

pub use instance_lock::{InstanceLock, LockFailure};
pub use launch_signal::{
    DuplicateLaunchHandler, LaunchSignal, NoopLaunchSignal, SignalError, SignalSubscription,
};
pub use liveness::LivenessProbe;
