//! Exclusive lock on the per-application lock file.

use std::fs::File;
use std::path::{Path, PathBuf};

use alone_core::{InstanceLock, InstancePaths, LockFailure};
use fs2::FileExt;
use tracing::{debug, info, warn};

use super::io::{
    is_same_file, open_lock_file, read_owner_record, remove_record, write_owner_record,
};

/// Owns the advisory lock on one well-known path.
///
/// The lock lives on the open handle, not on the file's existence: a record
/// left behind by a killed process is simply re-locked. Dropping the manager
/// releases the lock and deletes the record.
#[derive(Debug)]
pub struct LockManager {
    path: PathBuf,
    handle: Option<File>,
}

impl LockManager {
    /// Manager for the lock file at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: None,
        }
    }

    /// Manager for the lock file of a resolved application.
    pub fn for_paths(paths: &InstancePaths) -> Self {
        Self::new(paths.lock_path.clone())
    }

    fn try_lock(&self) -> Result<File, LockFailure> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                warn!(path = %parent.display(), error = %e, "Failed to create lock directory");
                LockFailure::Io(e.to_string())
            })?;
        }

        let file = open_lock_file(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to open lock file");
            LockFailure::Io(e.to_string())
        })?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                debug!(path = %self.path.display(), "Lock is held by another instance");
                return Err(LockFailure::Contended);
            }
            warn!(path = %self.path.display(), error = %e, "Failed to lock file");
            return Err(LockFailure::Io(e.to_string()));
        }

        // A concurrent reclaim may have unlinked the path between open and lock,
        // leaving us holding an orphaned inode.
        if !is_same_file(&file, &self.path) {
            debug!(path = %self.path.display(), "Lock file was replaced while locking");
            let _ = FileExt::unlock(&file);
            return Err(LockFailure::Contended);
        }

        Ok(file)
    }
}

impl InstanceLock for LockManager {
    fn path(&self) -> &Path {
        &self.path
    }

    fn try_acquire(&mut self) -> Result<(), LockFailure> {
        if self.handle.is_some() {
            return Ok(());
        }

        let file = self.try_lock()?;
        info!(path = %self.path.display(), "Acquired instance lock");
        self.handle = Some(file);
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.handle.is_some()
    }

    fn write_owner_id(&mut self, pid: i32) {
        let Some(file) = self.handle.as_mut() else {
            return;
        };

        if let Err(e) = write_owner_record(file, pid) {
            warn!(pid, path = %self.path.display(), error = %e, "Failed to write owner PID");
        }
    }

    fn read_owner_id(&self) -> Option<i32> {
        match read_owner_record(&self.path) {
            Ok(Some(pid)) => Some(pid),
            Ok(None) => {
                debug!(path = %self.path.display(), "Lock record is empty or malformed");
                None
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read lock record");
                None
            }
        }
    }

    fn release(&mut self) {
        let Some(file) = self.handle.take() else {
            return;
        };

        // Delete while still locked, and only if the path is still ours; a
        // later owner may have reclaimed it.
        if is_same_file(&file, &self.path)
            && let Err(e) = remove_record(&self.path)
        {
            warn!(path = %self.path.display(), error = %e, "Failed to delete lock file");
        }

        if let Err(e) = FileExt::unlock(&file) {
            debug!(path = %self.path.display(), error = %e, "Unlock failed, closing handle");
        }
        drop(file);

        info!(path = %self.path.display(), "Released instance lock");
    }

    fn reclaim_stale(&mut self) -> Result<(), LockFailure> {
        self.release();

        match remove_record(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Removed stale lock file");
                Ok(())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove stale lock file");
                Err(LockFailure::Io(e.to_string()))
            }
        }
    }
}

impl Drop for LockManager {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn own_pid() -> i32 {
        i32::try_from(std::process::id()).expect("pid fits i32")
    }

    #[test]
    fn acquire_creates_file_and_is_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        let mut lock = LockManager::new(&path);

        assert!(lock.acquire());
        assert!(lock.acquire());
        assert!(lock.is_held());
        assert!(path.exists());
    }

    #[test]
    fn acquire_creates_missing_parent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("app.lock");
        let mut lock = LockManager::new(&path);

        assert!(lock.acquire());
        assert!(path.exists());
    }

    #[test]
    fn second_handle_cannot_acquire() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        let mut first = LockManager::new(&path);
        let mut second = LockManager::new(&path);

        assert!(first.acquire());
        assert!(!second.acquire());
        // Retrying after a failure is clean
        assert!(!second.acquire());
        assert!(!second.is_held());

        first.release();
        assert!(second.acquire());
    }

    #[test]
    fn contention_is_not_reported_as_io() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        let mut first = LockManager::new(&path);
        let mut second = LockManager::new(&path);

        first.try_acquire().expect("first");
        assert_eq!(second.try_acquire(), Err(LockFailure::Contended));
    }

    #[test]
    fn directory_in_the_way_is_an_io_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        fs::create_dir(&path).expect("mkdir");
        fs::write(path.join("keep"), "x").expect("seed");
        let mut lock = LockManager::new(&path);

        assert!(matches!(lock.try_acquire(), Err(LockFailure::Io(_))));
        assert!(matches!(lock.reclaim_stale(), Err(LockFailure::Io(_))));
        assert!(!lock.is_held());
    }

    #[test]
    fn write_then_read_owner_id() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        let mut lock = LockManager::new(&path);

        assert!(lock.acquire());
        lock.write_owner_id(own_pid());

        assert_eq!(lock.read_owner_id(), Some(own_pid()));
        assert_eq!(fs::read_to_string(&path).expect("read"), own_pid().to_string());
    }

    #[test]
    fn write_without_lock_is_a_noop() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        fs::write(&path, "31337").expect("seed");
        let mut lock = LockManager::new(&path);

        lock.write_owner_id(42);

        assert_eq!(fs::read_to_string(&path).expect("read"), "31337");
    }

    #[test]
    fn read_works_while_another_handle_holds_the_lock() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        let mut holder = LockManager::new(&path);
        let observer = LockManager::new(&path);

        assert!(holder.acquire());
        holder.write_owner_id(4242);

        assert_eq!(observer.read_owner_id(), Some(4242));
    }

    #[test]
    fn read_missing_or_malformed_is_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        let lock = LockManager::new(&path);

        assert_eq!(lock.read_owner_id(), None);

        fs::write(&path, "").expect("seed");
        assert_eq!(lock.read_owner_id(), None);

        fs::write(&path, "garbage").expect("seed");
        assert_eq!(lock.read_owner_id(), None);
    }

    #[test]
    fn release_deletes_file_and_is_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        let mut lock = LockManager::new(&path);

        lock.release();
        assert!(lock.acquire());
        lock.release();
        lock.release();

        assert!(!lock.is_held());
        assert!(!path.exists());
    }

    #[test]
    fn drop_releases_the_lock() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");

        {
            let mut lock = LockManager::new(&path);
            assert!(lock.acquire());
        }

        assert!(!path.exists());
        assert!(LockManager::new(&path).acquire());
    }

    #[test]
    fn unlocked_leftover_record_is_reacquired() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        fs::write(&path, "999999").expect("seed");
        let mut lock = LockManager::new(&path);

        assert!(lock.acquire());
        lock.write_owner_id(own_pid());
        assert_eq!(lock.read_owner_id(), Some(own_pid()));
    }

    #[test]
    fn reclaim_stale_lets_a_new_owner_in() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("app.lock");
        let mut stale = LockManager::new(&path);
        let mut fresh = LockManager::new(&path);

        assert!(stale.acquire());
        stale.write_owner_id(999_999_999);
        assert!(!fresh.acquire());

        fresh.reclaim_stale().expect("reclaim");
        assert!(!path.exists());
        assert!(fresh.acquire());
        fresh.write_owner_id(own_pid());

        // The old holder must not delete the new owner's record
        stale.release();
        assert!(path.exists());
        assert_eq!(fresh.read_owner_id(), Some(own_pid()));
    }
}
