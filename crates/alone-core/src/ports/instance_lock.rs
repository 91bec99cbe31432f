//! Instance lock port.
//!
//! One implementation per OS-level exclusive resource. The coordinator owns
//! its lock explicitly; there is no global lock handle.

use std::path::Path;

use thiserror::Error;

/// Why the lock could not be taken or cleared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockFailure {
    /// Another handle holds the lock, or swapped the file while we locked it.
    #[error("Lock is held by another instance")]
    Contended,

    /// The lock path could not be created, opened, locked, or removed.
    #[error("{0}")]
    Io(String),
}

/// Exclusive, non-blocking lock on one well-known path plus the owner PID
/// record stored in it.
///
/// Record reads and writes degrade filesystem failures to `None`/no-op.
/// Taking and clearing the lock report a [`LockFailure`] so callers can tell
/// contention from a broken path.
pub trait InstanceLock: Send {
    /// Path of the lock record.
    fn path(&self) -> &Path;

    /// Try to take the lock without blocking.
    ///
    /// Safe to call repeatedly; returns `Ok` immediately if already held.
    fn try_acquire(&mut self) -> Result<(), LockFailure>;

    /// `true` iff the lock is now held.
    fn acquire(&mut self) -> bool {
        self.try_acquire().is_ok()
    }

    /// Whether this instance currently holds the lock.
    fn is_held(&self) -> bool;

    /// Replace the record with the decimal text of `pid`.
    ///
    /// Silently does nothing if the lock is not held.
    fn write_owner_id(&mut self, pid: i32);

    /// Read the recorded owner PID through an independent handle.
    ///
    /// `None` if the record is missing, empty, unreadable, or not an integer.
    fn read_owner_id(&self) -> Option<i32>;

    /// Unlock, close, and delete the record. No-op when not held.
    fn release(&mut self);

    /// Delete the record regardless of who holds it. A record that is
    /// already gone counts as success.
    ///
    /// Only valid once the recorded owner has been judged dead or unreadable.
    fn reclaim_stale(&mut self) -> Result<(), LockFailure>;
}
