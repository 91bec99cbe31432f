//! Status command handler.
//!
//! Reads the lock record without taking the lock, so it never disturbs a
//! running owner.

use std::fmt;
use std::path::PathBuf;

use alone_core::{InstanceLock, InstancePaths};
use alone_runtime::{LockManager, pid_exists};

use crate::commands::InstanceArgs;
use crate::error::CliError;

/// What the lock record says about the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockStatus {
    pub lock_path: PathBuf,
    pub exists: bool,
    pub owner_pid: Option<i32>,
    pub owner_alive: bool,
}

impl LockStatus {
    /// Inspect the record for `paths`.
    pub fn inspect(paths: &InstancePaths) -> Self {
        let lock = LockManager::for_paths(paths);
        let owner_pid = lock.read_owner_id();

        Self {
            exists: paths.lock_path.exists(),
            owner_alive: owner_pid.is_some_and(pid_exists),
            owner_pid,
            lock_path: paths.lock_path.clone(),
        }
    }

    fn summary(&self) -> &'static str {
        match (self.exists, self.owner_pid, self.owner_alive) {
            (false, _, _) => "not running",
            (true, Some(_), true) => "running",
            (true, Some(_), false) => "stale (owner is gone)",
            (true, None, _) => "stale (unreadable record)",
        }
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "lock_path = {}", self.lock_path.display())?;
        writeln!(f, "status = {}", self.summary())?;
        match self.owner_pid {
            Some(pid) => write!(f, "owner_pid = {pid}"),
            None => write!(f, "owner_pid = -"),
        }
    }
}

/// Print the lock status for the application.
pub fn execute(args: &InstanceArgs) -> Result<(), CliError> {
    let paths = InstancePaths::resolve(&args.config())?;
    println!("{}", LockStatus::inspect(&paths));
    Ok(())
}
