//! Platform-specific lock root resolution.

use std::env;
use std::path::{Path, PathBuf};

use super::ensure::ensure_directory;
use super::error::PathError;

/// Environment variable that overrides the lock root.
pub const LOCK_DIR_ENV: &str = "ALONE_LOCK_DIR";

/// Subdirectory created under the system default roots.
const LOCK_SUBDIR: &str = "alone";

/// Get the directory that holds lock files and signal endpoints.
///
/// Resolution order:
/// 1. `explicit` (e.g. `--lock-dir`), used verbatim
/// 2. `ALONE_LOCK_DIR` environment variable, used verbatim
/// 3. Per-user runtime directory (`$XDG_RUNTIME_DIR/alone`)
/// 4. System temporary directory (`$TMPDIR/alone`)
///
/// The directory is created if it does not exist.
pub fn lock_root(explicit: Option<&Path>) -> Result<PathBuf, PathError> {
    let root = match explicit {
        Some(path) if path.as_os_str().is_empty() => return Err(PathError::EmptyPath),
        Some(path) => path.to_path_buf(),
        None => default_root(),
    };

    ensure_directory(&root)?;
    Ok(root)
}

fn default_root() -> PathBuf {
    if let Ok(path) = env::var(LOCK_DIR_ENV)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    dirs::runtime_dir()
        .unwrap_or_else(env::temp_dir)
        .join(LOCK_SUBDIR)
}
