//! Duplicate-launch signal transport.
//!
//! Each application gets a Unix datagram socket beside its lock file.

mod socket;

pub use socket::SocketLaunchSignal;
