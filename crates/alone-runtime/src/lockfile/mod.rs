//! Lock file management for single-instance mutual exclusion.
//!
//! Provides the advisory-lock manager and the PID record I/O behind it.
//!
//! # Safety guarantees
//! - Non-blocking exclusive lock; contention reports `false` immediately
//! - The PID record is read through an independent handle, so it is visible
//!   while any process (including this one) holds the lock
//! - Release deletes the record only if the path still names our file

mod io;
mod manager;

pub use manager::LockManager;
