//! Lock record I/O.
//!
//! Format: the owner's PID as decimal text, no trailing newline required.
//! ```text
//! <pid>
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::os::unix::fs::{MetadataExt, OpenOptionsExt};
use std::path::Path;

/// Open (creating if absent) the lock file without truncating it.
pub(super) fn open_lock_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o644);
    options.open(path)
}

/// Replace the contents of the locked file with `pid`.
pub(super) fn write_owner_record(file: &mut File, pid: i32) -> io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(pid.to_string().as_bytes())?;
    file.sync_all()
}

/// Read the owner PID through a fresh, short-lived handle.
pub(super) fn read_owner_record(path: &Path) -> io::Result<Option<i32>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_owner_id(&content))
}

/// Parse the whole record, trimmed, as a decimal integer.
pub(super) fn parse_owner_id(content: &str) -> Option<i32> {
    content.trim().parse::<i32>().ok()
}

/// Whether `file` is still the file that `path` names.
///
/// False when the path was unlinked (and possibly recreated) after `file`
/// was opened.
pub(super) fn is_same_file(file: &File, path: &Path) -> bool {
    match (file.metadata(), fs::metadata(path)) {
        (Ok(held), Ok(current)) => held.dev() == current.dev() && held.ino() == current.ino(),
        _ => false,
    }
}

/// Delete `path`, treating "already gone" as success.
pub(super) fn remove_record(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
